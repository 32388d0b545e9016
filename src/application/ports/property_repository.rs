use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::dto::pagination::PageRequest;
use crate::application::dto::properties::{PropertyFilter, PropertyListItem};
use crate::domain::properties::{Property, PropertyFields};

/// Raw counts behind the occupancy statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccupancyCounts {
    pub total_properties: i64,
    pub total_units: i64,
    pub occupied_units: i64,
    pub active_leases: i64,
}

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn list(
        &self,
        account_id: Uuid,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<PropertyListItem>, i64)>;
    async fn list_all(&self, account_id: Uuid) -> anyhow::Result<Vec<Property>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Property>>;
    async fn find_by_address(
        &self,
        account_id: Uuid,
        address: &str,
    ) -> anyhow::Result<Option<Property>>;
    /// How many of `ids` belong to the account.
    async fn count_owned(&self, account_id: Uuid, ids: &[Uuid]) -> anyhow::Result<i64>;
    async fn count_units(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64>;
    async fn insert(&self, account_id: Uuid, fields: &PropertyFields) -> anyhow::Result<Property>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &PropertyFields,
    ) -> anyhow::Result<Option<Property>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
    async fn set_valuation(
        &self,
        account_id: Uuid,
        id: Uuid,
        value: Decimal,
        date: NaiveDate,
    ) -> anyhow::Result<()>;
    async fn occupancy_counts(&self, account_id: Uuid) -> anyhow::Result<OccupancyCounts>;
}
