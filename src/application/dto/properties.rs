use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::properties::{Property, PropertyStatus, PropertyType};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyFilter {
    /// Case-insensitive match on address or file number.
    pub search: Option<String>,
    pub property_type: Option<PropertyType>,
    pub status: Option<PropertyStatus>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub is_mortgaged: Option<bool>,
    pub investment_company_id: Option<Uuid>,
    #[param(value_type = Option<String>)]
    pub min_value: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_value: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub min_area: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_area: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PropertyListItem {
    #[serde(flatten)]
    pub property: Property,
    pub unit_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PropertyStatistics {
    pub total_properties: i64,
    pub total_units: i64,
    pub occupied_units: i64,
    pub active_leases: i64,
    #[schema(value_type = String)]
    pub occupancy_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PortfolioSummary {
    pub total_properties: usize,
    #[schema(value_type = String)]
    pub total_estimated_value: Decimal,
    #[schema(value_type = String)]
    pub total_mortgage_debt: Decimal,
    #[schema(value_type = String)]
    pub net_equity: Decimal,
    pub properties_by_type: BTreeMap<String, usize>,
    pub properties_by_status: BTreeMap<String, usize>,
}
