use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::units::{UnitFilter, UnitRecord};
use crate::domain::units::{Unit, UnitFields};

#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn list(&self, account_id: Uuid, filter: &UnitFilter) -> anyhow::Result<Vec<UnitRecord>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<UnitRecord>>;
    /// Id of another unit of the property carrying the same apartment number.
    async fn find_by_number(
        &self,
        account_id: Uuid,
        property_id: Uuid,
        apartment_number: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>>;
    async fn insert(&self, account_id: Uuid, fields: &UnitFields) -> anyhow::Result<Unit>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &UnitFields,
    ) -> anyhow::Result<Option<Unit>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
    async fn count_leases(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64>;
}
