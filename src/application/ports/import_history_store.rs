use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::imports::{ImportRecord, ImportType};

#[async_trait]
pub trait ImportHistoryStore: Send + Sync {
    async fn save(&self, record: ImportRecord) -> anyhow::Result<()>;
    /// Newest first.
    async fn list(
        &self,
        account_id: Uuid,
        import_type: Option<ImportType>,
    ) -> anyhow::Result<Vec<ImportRecord>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<ImportRecord>>;
    async fn mark_rolled_back(
        &self,
        account_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<ImportRecord>>;
}
