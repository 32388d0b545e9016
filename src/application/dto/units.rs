use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::leases::Lease;
use crate::domain::units::{OccupancyStatus, Unit, UnitType};

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UnitFilter {
    pub property_id: Option<Uuid>,
    pub unit_type: Option<UnitType>,
    pub floor: Option<i32>,
    pub room_count: Option<i32>,
    pub occupancy_status: Option<OccupancyStatus>,
    /// Case-insensitive match on apartment number or property address.
    pub search: Option<String>,
}

/// A unit joined with the address of its property.
#[derive(Debug, Clone)]
pub struct UnitRecord {
    pub unit: Unit,
    pub property_address: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnitView {
    #[serde(flatten)]
    pub unit: Unit,
    pub property_address: String,
    pub active_lease: Option<Lease>,
}
