use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::owners::OwnerListItem;
use crate::application::dto::pagination::PageRequest;
use crate::domain::owners::{Owner, OwnerFields};

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn list(
        &self,
        account_id: Uuid,
        search: Option<&str>,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<OwnerListItem>, i64)>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Owner>>;
    async fn find_by_name(&self, account_id: Uuid, name: &str) -> anyhow::Result<Option<Owner>>;
    async fn find_by_email(
        &self,
        account_id: Uuid,
        email: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>>;
    async fn insert(&self, account_id: Uuid, fields: &OwnerFields) -> anyhow::Result<Owner>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &OwnerFields,
    ) -> anyhow::Result<Option<Owner>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
    async fn count_ownerships(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64>;
}
