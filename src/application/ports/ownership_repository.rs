use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::owners::OwnershipRecord;
use crate::domain::ownerships::{Ownership, OwnershipFields};

#[async_trait]
pub trait OwnershipRepository: Send + Sync {
    async fn list_for_property(
        &self,
        account_id: Uuid,
        property_id: Uuid,
    ) -> anyhow::Result<Vec<OwnershipRecord>>;
    async fn list_for_owner(
        &self,
        account_id: Uuid,
        owner_id: Uuid,
    ) -> anyhow::Result<Vec<OwnershipRecord>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Ownership>>;
    async fn find_pair(
        &self,
        account_id: Uuid,
        property_id: Uuid,
        owner_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>>;
    async fn insert(&self, account_id: Uuid, fields: &OwnershipFields) -> anyhow::Result<Ownership>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &OwnershipFields,
    ) -> anyhow::Result<Option<Ownership>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
}
