use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::leases::{Lease, LeaseStatus};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeaseFilter {
    /// Case-insensitive match on property address or tenant name.
    pub search: Option<String>,
    pub status: Option<LeaseStatus>,
    pub property_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    pub end_date_from: Option<NaiveDate>,
    pub end_date_to: Option<NaiveDate>,
    #[param(value_type = Option<String>)]
    pub min_rent: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub max_rent: Option<Decimal>,
}

/// A lease with the labels a listing needs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaseRecord {
    #[serde(flatten)]
    pub lease: Lease,
    pub apartment_number: String,
    pub property_id: Uuid,
    pub property_address: String,
    pub tenant_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ExpiringLease {
    #[serde(flatten)]
    pub record: LeaseRecord,
    pub days_until_expiration: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshResult {
    pub updated: usize,
}
