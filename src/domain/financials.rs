use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::money::percentage;
use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, ensure};

crate::text_enum!(ExpenseType {
    Maintenance => "MAINTENANCE",
    Tax => "TAX",
    Insurance => "INSURANCE",
    Utilities => "UTILITIES",
    Renovation => "RENOVATION",
    Legal => "LEGAL",
    Other => "OTHER",
});

crate::text_enum!(IncomeType {
    Rent => "RENT",
    Sale => "SALE",
    CapitalGain => "CAPITAL_GAIN",
    Other => "OTHER",
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpenseFields {
    pub property_id: Uuid,
    pub expense_date: NaiveDate,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub expense_type: ExpenseType,
    pub category: String,
    pub description: Option<String>,
    pub payment_method: Option<String>,
}

impl ExpenseFields {
    pub fn validate(&self) -> RuleResult {
        ensure(self.amount > Decimal::ZERO, "amount must be positive")
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: ExpenseFields,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ExpensePatch {
    pub expense_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub expense_type: Option<ExpenseType>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub description: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub payment_method: DoubleOption<String>,
}

impl ExpensePatch {
    pub fn apply(self, f: &mut ExpenseFields) {
        set_if(self.expense_date, &mut f.expense_date);
        set_if(self.amount, &mut f.amount);
        set_if(self.expense_type, &mut f.expense_type);
        set_if(self.category, &mut f.category);
        self.description.apply_to(&mut f.description);
        self.payment_method.apply_to(&mut f.payment_method);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IncomeFields {
    pub property_id: Uuid,
    pub income_date: NaiveDate,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub income_type: IncomeType,
    pub source: Option<String>,
    pub description: Option<String>,
}

impl IncomeFields {
    pub fn validate(&self) -> RuleResult {
        ensure(self.amount > Decimal::ZERO, "amount must be positive")
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Income {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: IncomeFields,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct IncomePatch {
    pub income_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub income_type: Option<IncomeType>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub source: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub description: DoubleOption<String>,
}

impl IncomePatch {
    pub fn apply(self, f: &mut IncomeFields) {
        set_if(self.income_date, &mut f.income_date);
        set_if(self.amount, &mut f.amount);
        set_if(self.income_type, &mut f.income_type);
        self.source.apply_to(&mut f.source);
        self.description.apply_to(&mut f.description);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FinancialSummary {
    #[schema(value_type = String)]
    pub total_income: Decimal,
    #[schema(value_type = String)]
    pub total_expenses: Decimal,
    #[schema(value_type = String)]
    pub net_income: Decimal,
}

impl FinancialSummary {
    pub fn new(total_income: Decimal, total_expenses: Decimal) -> Self {
        Self {
            total_income,
            total_expenses,
            net_income: total_income - total_expenses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TypeBreakdown {
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(value_type = String)]
    pub total: Decimal,
    pub count: usize,
    #[schema(value_type = String)]
    pub percentage: Decimal,
}

/// Groups `(type, amount)` pairs; largest total first, ties by type name.
pub fn breakdown_by_type<'a>(
    entries: impl IntoIterator<Item = (&'a str, Decimal)>,
) -> Vec<TypeBreakdown> {
    let mut groups: HashMap<&str, (Decimal, usize)> = HashMap::new();
    let mut grand_total = Decimal::ZERO;
    for (kind, amount) in entries {
        let slot = groups.entry(kind).or_insert((Decimal::ZERO, 0));
        slot.0 += amount;
        slot.1 += 1;
        grand_total += amount;
    }
    let mut out: Vec<TypeBreakdown> = groups
        .into_iter()
        .map(|(kind, (total, count))| TypeBreakdown {
            kind: kind.to_string(),
            total,
            count,
            percentage: percentage(total, grand_total),
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.kind.cmp(&b.kind)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn breakdown_groups_and_computes_shares() {
        let rows = vec![
            ("TAX", dec!(300)),
            ("MAINTENANCE", dec!(100)),
            ("TAX", dec!(200)),
            ("LEGAL", dec!(100)),
        ];
        let b = breakdown_by_type(rows);
        assert_eq!(b.len(), 3);
        assert_eq!(b[0].kind, "TAX");
        assert_eq!(b[0].total, dec!(500));
        assert_eq!(b[0].count, 2);
        assert_eq!(b[0].percentage, dec!(71.43));
        assert_eq!(b[1].kind, "LEGAL");
        assert_eq!(b[2].kind, "MAINTENANCE");
        assert_eq!(b[2].percentage, dec!(14.29));
    }

    #[test]
    fn empty_breakdown_is_empty() {
        assert!(breakdown_by_type(Vec::<(&str, Decimal)>::new()).is_empty());
    }

    #[test]
    fn summary_nets_income_against_expenses() {
        let s = FinancialSummary::new(dec!(1200), dec!(1500));
        assert_eq!(s.net_income, dec!(-300));
    }
}
