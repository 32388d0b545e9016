use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, non_blank};

crate::text_enum!(BankAccountType {
    Checking => "CHECKING",
    Savings => "SAVINGS",
    Business => "BUSINESS",
    Trust => "TRUST",
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BankAccountFields {
    pub bank_name: String,
    pub branch_number: Option<String>,
    pub account_number: String,
    #[serde(default = "default_account_type")]
    pub account_type: BankAccountType,
    pub account_holder: Option<String>,
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_account_type() -> BankAccountType {
    BankAccountType::Checking
}

fn default_active() -> bool {
    true
}

impl BankAccountFields {
    pub fn validate(&self) -> RuleResult {
        non_blank(&self.bank_name, "bank_name")?;
        non_blank(&self.account_number, "account_number")
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BankAccount {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: BankAccountFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BankAccountPatch {
    pub bank_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub branch_number: DoubleOption<String>,
    pub account_number: Option<String>,
    pub account_type: Option<BankAccountType>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub account_holder: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
    pub is_active: Option<bool>,
}

impl BankAccountPatch {
    pub fn apply(self, f: &mut BankAccountFields) {
        set_if(self.bank_name, &mut f.bank_name);
        self.branch_number.apply_to(&mut f.branch_number);
        set_if(self.account_number, &mut f.account_number);
        set_if(self.account_type, &mut f.account_type);
        self.account_holder.apply_to(&mut f.account_holder);
        self.notes.apply_to(&mut f.notes);
        set_if(self.is_active, &mut f.is_active);
    }
}
