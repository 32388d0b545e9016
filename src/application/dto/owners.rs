use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::owners::Owner;
use crate::domain::ownerships::Ownership;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnerListItem {
    #[serde(flatten)]
    pub owner: Owner,
    pub ownership_count: i64,
}

/// An ownership labelled with both sides of the relation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnershipRecord {
    #[serde(flatten)]
    pub ownership: Ownership,
    pub owner_name: String,
    pub property_address: String,
}
