use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::application::ports::import_history_store::ImportHistoryStore;
use crate::domain::imports::{ImportRecord, ImportStatus, ImportType};

/// Process-local import history. Entries are lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryImportHistory {
    inner: Arc<RwLock<HashMap<Uuid, ImportRecord>>>,
}

impl InMemoryImportHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImportHistoryStore for InMemoryImportHistory {
    async fn save(&self, record: ImportRecord) -> anyhow::Result<()> {
        self.inner.write().await.insert(record.id, record);
        Ok(())
    }

    async fn list(
        &self,
        account_id: Uuid,
        import_type: Option<ImportType>,
    ) -> anyhow::Result<Vec<ImportRecord>> {
        let guard = self.inner.read().await;
        let mut out: Vec<ImportRecord> = guard
            .values()
            .filter(|r| r.account_id == account_id)
            .filter(|r| import_type.is_none_or(|t| r.import_type == t))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<ImportRecord>> {
        let guard = self.inner.read().await;
        Ok(guard.get(&id).filter(|r| r.account_id == account_id).cloned())
    }

    async fn mark_rolled_back(
        &self,
        account_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<ImportRecord>> {
        let mut guard = self.inner.write().await;
        let Some(record) = guard.get_mut(&id).filter(|r| r.account_id == account_id) else {
            return Ok(None);
        };
        record.status = ImportStatus::Failed;
        record.rolled_back = true;
        Ok(Some(record.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(account_id: Uuid, import_type: ImportType) -> ImportRecord {
        ImportRecord::new(account_id, import_type, 1, Vec::new(), vec![Uuid::new_v4()])
    }

    #[tokio::test]
    async fn list_is_scoped_to_the_account_and_type() {
        let store = InMemoryImportHistory::new();
        let mine = Uuid::new_v4();
        store.save(record(mine, ImportType::Owners)).await.unwrap();
        store.save(record(mine, ImportType::Properties)).await.unwrap();
        store.save(record(Uuid::new_v4(), ImportType::Owners)).await.unwrap();

        assert_eq!(store.list(mine, None).await.unwrap().len(), 2);
        let owners = store.list(mine, Some(ImportType::Owners)).await.unwrap();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].import_type, ImportType::Owners);
    }

    #[tokio::test]
    async fn rollback_marks_the_record_failed() {
        let store = InMemoryImportHistory::new();
        let account = Uuid::new_v4();
        let rec = record(account, ImportType::Owners);
        let id = rec.id;
        store.save(rec).await.unwrap();

        assert!(store.mark_rolled_back(Uuid::new_v4(), id).await.unwrap().is_none());
        let updated = store.mark_rolled_back(account, id).await.unwrap().unwrap();
        assert!(updated.rolled_back);
        assert_eq!(updated.status, ImportStatus::Failed);
        assert!(store.get(account, id).await.unwrap().unwrap().rolled_back);
    }
}
