use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::valuations::{Valuation, ValuationFields};

#[async_trait]
pub trait ValuationRepository: Send + Sync {
    /// Newest first.
    async fn list_for_property(
        &self,
        account_id: Uuid,
        property_id: Uuid,
    ) -> anyhow::Result<Vec<Valuation>>;
    async fn latest_for_property(
        &self,
        account_id: Uuid,
        property_id: Uuid,
    ) -> anyhow::Result<Option<Valuation>>;
    /// `(property_id, value)` of the newest valuation of every valued property.
    async fn latest_values(&self, account_id: Uuid) -> anyhow::Result<Vec<(Uuid, Decimal)>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Valuation>>;
    /// Every valuation of the account dated within the inclusive bounds, oldest first.
    async fn list_between(
        &self,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Valuation>>;
    async fn insert(&self, account_id: Uuid, fields: &ValuationFields) -> anyhow::Result<Valuation>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &ValuationFields,
    ) -> anyhow::Result<Option<Valuation>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
}
