use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::imports::RowError;
use crate::domain::mortgages::MortgageStatus;
use crate::domain::ownerships::OwnershipType;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportPreview {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub errors: Vec<RowError>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RollbackResult {
    pub deleted: usize,
}

/// One ownership line; the property and owner are named rather than referenced by id.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OwnershipRow {
    pub property_address: String,
    pub owner_name: String,
    #[schema(value_type = String)]
    pub ownership_percentage: Decimal,
    #[serde(default = "default_ownership_type")]
    pub ownership_type: OwnershipType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

fn default_ownership_type() -> OwnershipType {
    OwnershipType::Full
}

/// One mortgage line, attached to the property at `property_address`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MortgageRow {
    pub property_address: String,
    pub bank: String,
    #[schema(value_type = String)]
    pub loan_amount: Decimal,
    #[schema(value_type = Option<String>)]
    pub interest_rate: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub monthly_payment: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_mortgage_status")]
    pub status: MortgageStatus,
    pub notes: Option<String>,
}

fn default_mortgage_status() -> MortgageStatus {
    MortgageStatus::Active
}

/// Land-registry line for the property at `property_address`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlotInfoRow {
    pub property_address: String,
    pub gush: String,
    pub chelka: String,
    pub sub_chelka: Option<String>,
    pub registry_number: Option<String>,
    pub registry_office: Option<String>,
    pub notes: Option<String>,
}
