use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, ensure};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TenantFields {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl TenantFields {
    pub fn validate(&self) -> RuleResult {
        ensure(
            self.name.trim().chars().count() >= 2,
            "name must be at least 2 characters",
        )?;
        if let Some(email) = &self.email {
            ensure(email.contains('@'), "email must be a valid email address")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Tenant {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: TenantFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TenantPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub email: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl TenantPatch {
    pub fn apply(self, f: &mut TenantFields) {
        set_if(self.name, &mut f.name);
        self.email.apply_to(&mut f.email);
        self.phone.apply_to(&mut f.phone);
        self.notes.apply_to(&mut f.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant(name: &str, email: Option<&str>) -> TenantFields {
        TenantFields {
            name: name.into(),
            email: email.map(Into::into),
            phone: None,
            notes: None,
        }
    }

    #[test]
    fn short_names_are_rejected() {
        assert!(tenant("A", None).validate().is_err());
        assert!(tenant("Al", None).validate().is_ok());
        assert!(tenant("דנ", None).validate().is_ok());
    }

    #[test]
    fn email_must_look_like_an_address() {
        assert!(tenant("Dana", Some("dana")).validate().is_err());
        assert!(tenant("Dana", Some("dana@example.com")).validate().is_ok());
    }
}
