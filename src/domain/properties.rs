use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, ensure, non_blank, percentage_in_range};

crate::text_enum!(PropertyType {
    Residential => "RESIDENTIAL",
    Commercial => "COMMERCIAL",
    Land => "LAND",
    MixedUse => "MIXED_USE",
});

crate::text_enum!(PropertyStatus {
    Owned => "OWNED",
    InConstruction => "IN_CONSTRUCTION",
    InPurchase => "IN_PURCHASE",
    Investment => "INVESTMENT",
    Sold => "SOLD",
});

pub const DEFAULT_COUNTRY: &str = "Israel";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PropertyFields {
    pub address: String,
    pub file_number: Option<String>,
    pub property_type: Option<PropertyType>,
    pub status: Option<PropertyStatus>,
    #[serde(default = "default_country")]
    pub country: String,
    pub city: Option<String>,
    #[schema(value_type = Option<String>)]
    pub total_area: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub land_area: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub estimated_value: Option<Decimal>,
    pub last_valuation_date: Option<NaiveDate>,
    pub investment_company_id: Option<Uuid>,
    #[serde(default)]
    pub is_mortgaged: bool,
    #[schema(value_type = Option<String>)]
    pub acquisition_price: Option<Decimal>,
    pub acquisition_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_sold: bool,
    pub sale_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub is_partial_ownership: bool,
    #[schema(value_type = Option<String>)]
    pub shared_ownership_percentage: Option<Decimal>,
    pub notes: Option<String>,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl PropertyFields {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            file_number: None,
            property_type: None,
            status: None,
            country: default_country(),
            city: None,
            total_area: None,
            land_area: None,
            estimated_value: None,
            last_valuation_date: None,
            investment_company_id: None,
            is_mortgaged: false,
            acquisition_price: None,
            acquisition_date: None,
            is_sold: false,
            sale_date: None,
            sale_price: None,
            is_partial_ownership: false,
            shared_ownership_percentage: None,
            notes: None,
        }
    }

    /// Cross-field rules checked on create and on the merged row after an update.
    pub fn validate(&self) -> RuleResult {
        non_blank(&self.address, "address")?;
        if let (Some(acquired), Some(sold)) = (self.acquisition_date, self.sale_date) {
            ensure(
                acquired <= sold,
                "acquisition_date must be on or before sale_date",
            )?;
        }
        if let (Some(land), Some(total)) = (self.land_area, self.total_area) {
            ensure(land <= total, "land_area cannot exceed total_area")?;
        }
        for (value, field) in [
            (self.total_area, "total_area"),
            (self.land_area, "land_area"),
            (self.estimated_value, "estimated_value"),
            (self.acquisition_price, "acquisition_price"),
            (self.sale_price, "sale_price"),
        ] {
            if let Some(v) = value {
                ensure(v >= Decimal::ZERO, &format!("{field} must not be negative"))?;
            }
        }
        if let Some(pct) = self.shared_ownership_percentage {
            percentage_in_range(pct, "shared_ownership_percentage")?;
        }
        if self.is_sold {
            ensure(self.sale_date.is_some(), "sale_date is required when is_sold is true")?;
        }
        if self.is_partial_ownership {
            ensure(
                self.shared_ownership_percentage.is_some(),
                "shared_ownership_percentage is required for partial ownership",
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Property {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: PropertyFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PropertyPatch {
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub file_number: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<PropertyType>)]
    pub property_type: DoubleOption<PropertyType>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<PropertyStatus>)]
    pub status: DoubleOption<PropertyStatus>,
    pub country: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub city: DoubleOption<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub total_area: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub land_area: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub estimated_value: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub last_valuation_date: DoubleOption<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub investment_company_id: DoubleOption<Uuid>,
    pub is_mortgaged: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub acquisition_price: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub acquisition_date: DoubleOption<NaiveDate>,
    pub is_sold: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub sale_date: DoubleOption<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub sale_price: DoubleOption<Decimal>,
    pub is_partial_ownership: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub shared_ownership_percentage: DoubleOption<Decimal>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl PropertyPatch {
    pub fn apply(self, f: &mut PropertyFields) {
        set_if(self.address, &mut f.address);
        self.file_number.apply_to(&mut f.file_number);
        self.property_type.apply_to(&mut f.property_type);
        self.status.apply_to(&mut f.status);
        set_if(self.country, &mut f.country);
        self.city.apply_to(&mut f.city);
        self.total_area.apply_to(&mut f.total_area);
        self.land_area.apply_to(&mut f.land_area);
        self.estimated_value.apply_to(&mut f.estimated_value);
        self.last_valuation_date.apply_to(&mut f.last_valuation_date);
        self.investment_company_id
            .apply_to(&mut f.investment_company_id);
        set_if(self.is_mortgaged, &mut f.is_mortgaged);
        self.acquisition_price.apply_to(&mut f.acquisition_price);
        self.acquisition_date.apply_to(&mut f.acquisition_date);
        set_if(self.is_sold, &mut f.is_sold);
        self.sale_date.apply_to(&mut f.sale_date);
        self.sale_price.apply_to(&mut f.sale_price);
        set_if(self.is_partial_ownership, &mut f.is_partial_ownership);
        self.shared_ownership_percentage
            .apply_to(&mut f.shared_ownership_percentage);
        self.notes.apply_to(&mut f.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn minimal_property_is_valid_and_defaults_to_israel() {
        let f: PropertyFields = serde_json::from_str(r#"{"address":"הרצל 10"}"#).unwrap();
        assert_eq!(f.country, "Israel");
        assert!(f.validate().is_ok());
    }

    #[test]
    fn sale_before_acquisition_is_rejected() {
        let mut f = PropertyFields::new("A");
        f.acquisition_date = Some(d("2020-05-01"));
        f.sale_date = Some(d("2020-04-30"));
        assert!(f.validate().is_err());
        f.sale_date = Some(d("2020-05-01"));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn land_area_cannot_exceed_total_area() {
        let mut f = PropertyFields::new("A");
        f.total_area = Some(dec!(100));
        f.land_area = Some(dec!(120));
        assert!(f.validate().is_err());
    }

    #[test]
    fn sold_requires_sale_date_and_partial_requires_share() {
        let mut f = PropertyFields::new("A");
        f.is_sold = true;
        assert!(f.validate().is_err());
        f.sale_date = Some(d("2024-01-01"));
        assert!(f.validate().is_ok());

        f.is_partial_ownership = true;
        assert!(f.validate().is_err());
        f.shared_ownership_percentage = Some(dec!(150));
        assert!(f.validate().is_err());
        f.shared_ownership_percentage = Some(dec!(50));
        assert!(f.validate().is_ok());
    }

    #[test]
    fn patch_is_validated_against_merged_values() {
        let mut f = PropertyFields::new("A");
        f.total_area = Some(dec!(100));
        let patch: PropertyPatch = serde_json::from_str(r#"{"land_area":"150"}"#).unwrap();
        patch.apply(&mut f);
        assert!(f.validate().is_err());
    }
}
