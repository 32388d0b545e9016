use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, ensure, non_blank};

crate::text_enum!(OwnerType {
    Individual => "INDIVIDUAL",
    Company => "COMPANY",
    Partnership => "PARTNERSHIP",
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnerFields {
    pub name: String,
    #[serde(default = "default_owner_type")]
    pub owner_type: OwnerType,
    /// National id or company tax id.
    pub id_number: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

fn default_owner_type() -> OwnerType {
    OwnerType::Individual
}

impl OwnerFields {
    pub fn validate(&self) -> RuleResult {
        non_blank(&self.name, "name")?;
        if let Some(email) = &self.email {
            ensure(email.contains('@'), "email must be a valid email address")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Owner {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: OwnerFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OwnerPatch {
    pub name: Option<String>,
    pub owner_type: Option<OwnerType>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub id_number: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub email: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub address: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl OwnerPatch {
    pub fn apply(self, f: &mut OwnerFields) {
        set_if(self.name, &mut f.name);
        set_if(self.owner_type, &mut f.owner_type);
        self.id_number.apply_to(&mut f.id_number);
        self.email.apply_to(&mut f.email);
        self.phone.apply_to(&mut f.phone);
        self.address.apply_to(&mut f.address);
        self.notes.apply_to(&mut f.notes);
    }
}
