use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::tenants::{Tenant, TenantFields};

#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn search(&self, account_id: Uuid, search: Option<&str>) -> anyhow::Result<Vec<Tenant>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Tenant>>;
    async fn find_by_email(
        &self,
        account_id: Uuid,
        email: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>>;
    async fn insert(&self, account_id: Uuid, fields: &TenantFields) -> anyhow::Result<Tenant>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &TenantFields,
    ) -> anyhow::Result<Option<Tenant>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
}
