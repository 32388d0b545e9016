use uuid::Uuid;

use crate::application::dto::imports::RollbackResult;
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::import_history_store::ImportHistoryStore;
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::application::ports::owner_repository::OwnerRepository;
use crate::application::ports::ownership_repository::OwnershipRepository;
use crate::application::ports::plot_info_repository::PlotInfoRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::domain::imports::{ImportRecord, ImportType};

const ENTITY: &str = "Import";

pub struct ListImportHistory<'a, H: ImportHistoryStore + ?Sized> {
    pub history: &'a H,
}

impl<'a, H: ImportHistoryStore + ?Sized> ListImportHistory<'a, H> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        import_type: Option<ImportType>,
    ) -> ServiceResult<Vec<ImportRecord>> {
        Ok(self.history.list(account_id, import_type).await?)
    }
}

pub struct GetImport<'a, H: ImportHistoryStore + ?Sized> {
    pub history: &'a H,
}

impl<'a, H: ImportHistoryStore + ?Sized> GetImport<'a, H> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<ImportRecord> {
        self.history.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

/// Deletes what an import created. Rows already gone are skipped.
pub struct RollbackImport<'a, P, O, S, M, L, H>
where
    P: PropertyRepository + ?Sized,
    O: OwnerRepository + ?Sized,
    S: OwnershipRepository + ?Sized,
    M: MortgageRepository + ?Sized,
    L: PlotInfoRepository + ?Sized,
    H: ImportHistoryStore + ?Sized,
{
    pub properties: &'a P,
    pub owners: &'a O,
    pub ownerships: &'a S,
    pub mortgages: &'a M,
    pub plot_info: &'a L,
    pub history: &'a H,
}

impl<'a, P, O, S, M, L, H> RollbackImport<'a, P, O, S, M, L, H>
where
    P: PropertyRepository + ?Sized,
    O: OwnerRepository + ?Sized,
    S: OwnershipRepository + ?Sized,
    M: MortgageRepository + ?Sized,
    L: PlotInfoRepository + ?Sized,
    H: ImportHistoryStore + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<RollbackResult> {
        let record = self.history.get(account_id, id).await?.or_not_found(ENTITY)?;
        if record.rolled_back {
            return Err(ServiceError::bad_request("Import has already been rolled back"));
        }

        let mut deleted = 0;
        for record_id in &record.imported_record_ids {
            let removed = match record.import_type {
                ImportType::Properties => self.properties.delete(account_id, *record_id).await,
                ImportType::Owners => self.owners.delete(account_id, *record_id).await,
                ImportType::Ownerships => self.ownerships.delete(account_id, *record_id).await,
                ImportType::Mortgages => self.mortgages.delete(account_id, *record_id).await,
                ImportType::PlotInfo => self.plot_info.delete(account_id, *record_id).await,
            };
            match removed {
                Ok(true) => deleted += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(import_id = %id, %record_id, error = ?e, "rollback_delete_failed");
                }
            }
        }
        self.history
            .mark_rolled_back(account_id, id)
            .await?
            .or_not_found(ENTITY)?;
        tracing::info!(%account_id, import_id = %id, deleted, "import_rolled_back");
        Ok(RollbackResult { deleted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{
        MemMortgages, MemOwners, MemOwnerships, MemPlots, MemProperties,
    };
    use crate::domain::plot_info::PlotInfoFields;
    use crate::infrastructure::imports::history_store::InMemoryImportHistory;

    #[derive(Default)]
    struct Stores {
        properties: MemProperties,
        owners: MemOwners,
        ownerships: MemOwnerships,
        mortgages: MemMortgages,
        plot_info: MemPlots,
        history: InMemoryImportHistory,
    }

    impl Stores {
        async fn rollback(&self, account_id: Uuid, id: Uuid) -> ServiceResult<RollbackResult> {
            RollbackImport {
                properties: &self.properties,
                owners: &self.owners,
                ownerships: &self.ownerships,
                mortgages: &self.mortgages,
                plot_info: &self.plot_info,
                history: &self.history,
            }
            .execute(account_id, id)
            .await
        }

        async fn record(&self, account_id: Uuid, import_type: ImportType, ids: Vec<Uuid>) -> Uuid {
            let record = ImportRecord::new(account_id, import_type, ids.len(), Vec::new(), ids);
            let id = record.id;
            self.history.save(record).await.unwrap();
            id
        }
    }

    #[tokio::test]
    async fn rollback_counts_what_it_removed_and_runs_once() {
        let stores = Stores::default();
        let account = Uuid::new_v4();
        let ids = vec![
            stores.owners.seed(account, "Yossi Cohen"),
            stores.owners.seed(account, "Dana Levi"),
            Uuid::new_v4(),
        ];
        let import_id = stores.record(account, ImportType::Owners, ids).await;

        let result = stores.rollback(account, import_id).await.unwrap();
        assert_eq!(result.deleted, 2);
        assert_eq!(stores.owners.count(), 0);
        let saved = stores.history.get(account, import_id).await.unwrap().unwrap();
        assert!(saved.rolled_back);

        let err = stores.rollback(account, import_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn plot_imports_roll_back_through_their_own_store() {
        let stores = Stores::default();
        let account = Uuid::new_v4();
        let property_id = stores.properties.seed(account, "הרצל 10, תל אביב");
        let plot = stores
            .plot_info
            .insert(account, property_id, &PlotInfoFields::default())
            .await
            .unwrap();
        let import_id = stores.record(account, ImportType::PlotInfo, vec![plot.id]).await;

        let result = stores.rollback(account, import_id).await.unwrap();
        assert_eq!(result.deleted, 1);
        assert_eq!(stores.plot_info.count(), 0);
        assert_eq!(stores.properties.count(), 1);
    }

    #[tokio::test]
    async fn other_accounts_cannot_roll_back_an_import() {
        let stores = Stores::default();
        let import_id = stores.record(Uuid::new_v4(), ImportType::Owners, Vec::new()).await;
        let err = stores.rollback(Uuid::new_v4(), import_id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
