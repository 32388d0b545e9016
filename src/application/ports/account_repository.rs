use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::accounts::{Account, AccountStatus};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Account>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Account>>;
    async fn create(&self, id: Uuid, name: &str, status: AccountStatus)
    -> anyhow::Result<Account>;
}
