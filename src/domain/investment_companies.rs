use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, ensure, non_blank, percentage_in_range};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvestmentCompanyFields {
    pub name: String,
    pub registration_number: Option<String>,
    pub country: Option<String>,
    #[schema(value_type = Option<String>)]
    pub investment_amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub ownership_percentage: Option<Decimal>,
    pub notes: Option<String>,
}

impl InvestmentCompanyFields {
    pub fn validate(&self) -> RuleResult {
        non_blank(&self.name, "name")?;
        if let Some(amount) = self.investment_amount {
            ensure(
                amount >= Decimal::ZERO,
                "investment_amount must not be negative",
            )?;
        }
        if let Some(pct) = self.ownership_percentage {
            percentage_in_range(pct, "ownership_percentage")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvestmentCompany {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: InvestmentCompanyFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InvestmentCompanyPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub registration_number: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub country: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub investment_amount: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub ownership_percentage: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl InvestmentCompanyPatch {
    pub fn apply(self, f: &mut InvestmentCompanyFields) {
        set_if(self.name, &mut f.name);
        self.registration_number
            .apply_to(&mut f.registration_number);
        self.country.apply_to(&mut f.country);
        self.investment_amount.apply_to(&mut f.investment_amount);
        self.ownership_percentage
            .apply_to(&mut f.ownership_percentage);
        self.notes.apply_to(&mut f.notes);
    }
}
