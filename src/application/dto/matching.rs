use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Best property found for one submitted address; `score` is 0 when nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AddressMatch {
    pub address: String,
    pub property_id: Option<Uuid>,
    pub property_address: Option<String>,
    pub score: u8,
}
