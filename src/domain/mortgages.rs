use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::money::round2;
use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, end_after_start, ensure, non_blank, percentage_in_range};

crate::text_enum!(MortgageStatus {
    Active => "ACTIVE",
    PaidOff => "PAID_OFF",
    Refinanced => "REFINANCED",
    Defaulted => "DEFAULTED",
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MortgageFields {
    pub property_id: Uuid,
    pub bank: String,
    #[schema(value_type = String)]
    pub loan_amount: Decimal,
    #[schema(value_type = Option<String>)]
    pub interest_rate: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub monthly_payment: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_status")]
    pub status: MortgageStatus,
    pub bank_account_id: Option<Uuid>,
    #[serde(default)]
    pub linked_properties: Vec<Uuid>,
    pub notes: Option<String>,
}

fn default_status() -> MortgageStatus {
    MortgageStatus::Active
}

impl MortgageFields {
    pub fn validate(&self) -> RuleResult {
        non_blank(&self.bank, "bank")?;
        ensure(self.loan_amount > Decimal::ZERO, "loan_amount must be positive")?;
        if let Some(rate) = self.interest_rate {
            percentage_in_range(rate, "interest_rate")?;
        }
        if let Some(payment) = self.monthly_payment {
            ensure(payment >= Decimal::ZERO, "monthly_payment must not be negative")?;
        }
        end_after_start(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Mortgage {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: MortgageFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MortgagePatch {
    pub bank: Option<String>,
    #[schema(value_type = Option<String>)]
    pub loan_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub interest_rate: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub monthly_payment: DoubleOption<Decimal>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub end_date: DoubleOption<NaiveDate>,
    pub status: Option<MortgageStatus>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub bank_account_id: DoubleOption<Uuid>,
    pub linked_properties: Option<Vec<Uuid>>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl MortgagePatch {
    pub fn apply(self, f: &mut MortgageFields) {
        set_if(self.bank, &mut f.bank);
        set_if(self.loan_amount, &mut f.loan_amount);
        self.interest_rate.apply_to(&mut f.interest_rate);
        self.monthly_payment.apply_to(&mut f.monthly_payment);
        set_if(self.start_date, &mut f.start_date);
        self.end_date.apply_to(&mut f.end_date);
        set_if(self.status, &mut f.status);
        self.bank_account_id.apply_to(&mut f.bank_account_id);
        set_if(self.linked_properties, &mut f.linked_properties);
        self.notes.apply_to(&mut f.notes);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentFields {
    pub payment_date: NaiveDate,
    #[schema(value_type = String)]
    pub amount: Decimal,
    #[schema(value_type = Option<String>)]
    pub principal: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub interest: Option<Decimal>,
    pub notes: Option<String>,
}

impl PaymentFields {
    pub fn validate(&self) -> RuleResult {
        ensure(self.amount > Decimal::ZERO, "amount must be positive")?;
        for (part, field) in [(self.principal, "principal"), (self.interest, "interest")] {
            if let Some(v) = part {
                ensure(v >= Decimal::ZERO, &format!("{field} must not be negative"))?;
                ensure(v <= self.amount, &format!("{field} cannot exceed amount"))?;
            }
        }
        let split = self.principal.unwrap_or_default() + self.interest.unwrap_or_default();
        ensure(
            split <= self.amount,
            "principal plus interest cannot exceed amount",
        )
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MortgagePayment {
    pub id: Uuid,
    pub account_id: Uuid,
    pub mortgage_id: Uuid,
    #[serde(flatten)]
    pub fields: PaymentFields,
    pub created_at: DateTime<Utc>,
}

/// Loan minus repaid principal, never below zero.
pub fn remaining_balance(loan_amount: Decimal, principal_paid: Decimal) -> Decimal {
    (loan_amount - principal_paid).max(Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MortgageSummary {
    pub total_mortgages: usize,
    #[schema(value_type = String)]
    pub total_loan_amount: Decimal,
    #[schema(value_type = String)]
    pub total_remaining_balance: Decimal,
    #[schema(value_type = String)]
    pub total_monthly_payment: Decimal,
    #[schema(value_type = String)]
    pub average_interest_rate: Decimal,
    pub count_by_status: BTreeMap<String, usize>,
}

impl MortgageSummary {
    /// `items` pairs each mortgage with the principal repaid on it so far.
    pub fn compute(items: &[(MortgageFields, Decimal)]) -> Self {
        let mut total_loan = Decimal::ZERO;
        let mut total_remaining = Decimal::ZERO;
        let mut total_monthly = Decimal::ZERO;
        let mut weighted_rate = Decimal::ZERO;
        let mut rated_loan = Decimal::ZERO;
        let mut count_by_status = BTreeMap::new();
        for (m, principal_paid) in items {
            total_loan += m.loan_amount;
            total_remaining += remaining_balance(m.loan_amount, *principal_paid);
            if m.status == MortgageStatus::Active {
                total_monthly += m.monthly_payment.unwrap_or_default();
            }
            if let Some(rate) = m.interest_rate {
                weighted_rate += rate * m.loan_amount;
                rated_loan += m.loan_amount;
            }
            *count_by_status
                .entry(m.status.as_str().to_string())
                .or_insert(0) += 1;
        }
        let average_interest_rate = if rated_loan > Decimal::ZERO {
            round2(weighted_rate / rated_loan)
        } else {
            Decimal::ZERO
        };
        Self {
            total_mortgages: items.len(),
            total_loan_amount: total_loan,
            total_remaining_balance: total_remaining,
            total_monthly_payment: total_monthly,
            average_interest_rate,
            count_by_status,
        }
    }
}
