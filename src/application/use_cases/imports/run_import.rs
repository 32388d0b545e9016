use serde_json::Value;
use uuid::Uuid;

use crate::application::dto::imports::{MortgageRow, OwnershipRow, PlotInfoRow};
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::bank_account_repository::BankAccountRepository;
use crate::application::ports::import_history_store::ImportHistoryStore;
use crate::application::ports::investment_company_repository::InvestmentCompanyRepository;
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::application::ports::owner_repository::OwnerRepository;
use crate::application::ports::ownership_repository::OwnershipRepository;
use crate::application::ports::plot_info_repository::PlotInfoRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::application::use_cases::imports::rows::{
    check_mortgage_row, check_ownership_row, check_plot_info_row, mortgage_fields,
    ownership_fields, parse_row, plot_info_fields, row_message,
};
use crate::application::use_cases::mortgages::manage_mortgages::CreateMortgage;
use crate::application::use_cases::owners::manage_owners::CreateOwner;
use crate::application::use_cases::plot_info::manage_plot_info::CreatePlotInfo;
use crate::application::use_cases::properties::manage_properties::CreateProperty;
use crate::domain::imports::{ImportRecord, ImportType, RowError, row_number};
use crate::domain::owners::OwnerFields;
use crate::domain::properties::{Property, PropertyFields};

/// Writes rows one by one. A failing row is recorded and the rest continue.
pub struct RunImport<'a, P, C, O, S, M, B, L, H>
where
    P: PropertyRepository + ?Sized,
    C: InvestmentCompanyRepository + ?Sized,
    O: OwnerRepository + ?Sized,
    S: OwnershipRepository + ?Sized,
    M: MortgageRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
    L: PlotInfoRepository + ?Sized,
    H: ImportHistoryStore + ?Sized,
{
    pub properties: &'a P,
    pub companies: &'a C,
    pub owners: &'a O,
    pub ownerships: &'a S,
    pub mortgages: &'a M,
    pub bank_accounts: &'a B,
    pub plot_info: &'a L,
    pub history: &'a H,
}

impl<'a, P, C, O, S, M, B, L, H> RunImport<'a, P, C, O, S, M, B, L, H>
where
    P: PropertyRepository + ?Sized,
    C: InvestmentCompanyRepository + ?Sized,
    O: OwnerRepository + ?Sized,
    S: OwnershipRepository + ?Sized,
    M: MortgageRepository + ?Sized,
    B: BankAccountRepository + ?Sized,
    L: PlotInfoRepository + ?Sized,
    H: ImportHistoryStore + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        import_type: ImportType,
        rows: &[Value],
    ) -> ServiceResult<ImportRecord> {
        if rows.is_empty() {
            return Err(ServiceError::bad_request("rows must not be empty"));
        }
        let mut errors = Vec::new();
        let mut ids = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            match self.import_row(account_id, import_type, row).await {
                Ok(id) => ids.push(id),
                Err(message) => errors.push(RowError {
                    row: row_number(index),
                    message,
                }),
            }
        }

        let record = ImportRecord::new(account_id, import_type, rows.len(), errors, ids);
        tracing::info!(
            %account_id,
            import_id = %record.id,
            import_type = %import_type,
            successful = record.successful,
            failed = record.failed,
            "import_finished"
        );
        self.history.save(record.clone()).await?;
        Ok(record)
    }

    async fn import_row(&self, account_id: Uuid, import_type: ImportType, row: &Value) -> Result<Uuid, String> {
        match import_type {
            ImportType::Properties => {
                let fields: PropertyFields = parse_row(row)?;
                let taken = self
                    .properties
                    .find_by_address(account_id, &fields.address)
                    .await
                    .map_err(|e| row_message(e.into()))?;
                if taken.is_some() {
                    return Err(format!("Property already exists: {}", fields.address));
                }
                CreateProperty {
                    repo: self.properties,
                    companies: self.companies,
                }
                .execute(account_id, fields)
                .await
                .map(|p| p.id)
                .map_err(row_message)
            }
            ImportType::Owners => {
                let fields: OwnerFields = parse_row(row)?;
                CreateOwner { repo: self.owners }
                    .execute(account_id, fields)
                    .await
                    .map(|o| o.id)
                    .map_err(row_message)
            }
            ImportType::Ownerships => {
                let row: OwnershipRow = parse_row(row)?;
                self.import_ownership(account_id, &row)
                    .await
                    .map_err(row_message)
            }
            ImportType::Mortgages => {
                let row: MortgageRow = parse_row(row)?;
                self.import_mortgage(account_id, &row)
                    .await
                    .map_err(row_message)
            }
            ImportType::PlotInfo => {
                let row: PlotInfoRow = parse_row(row)?;
                self.import_plot_info(account_id, &row)
                    .await
                    .map_err(row_message)
            }
        }
    }

    async fn property_at(&self, account_id: Uuid, address: &str) -> ServiceResult<Property> {
        self.properties
            .find_by_address(account_id, address.trim())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Property not found: {address}")))
    }

    async fn import_mortgage(&self, account_id: Uuid, row: &MortgageRow) -> ServiceResult<Uuid> {
        check_mortgage_row(row)?;
        let property = self.property_at(account_id, &row.property_address).await?;
        let mortgage = CreateMortgage {
            repo: self.mortgages,
            properties: self.properties,
            bank_accounts: self.bank_accounts,
        }
        .execute(account_id, mortgage_fields(row, property.id))
        .await?;
        Ok(mortgage.id)
    }

    async fn import_plot_info(&self, account_id: Uuid, row: &PlotInfoRow) -> ServiceResult<Uuid> {
        check_plot_info_row(row)?;
        let property = self.property_at(account_id, &row.property_address).await?;
        let plot = CreatePlotInfo {
            repo: self.plot_info,
            properties: self.properties,
        }
        .execute(account_id, property.id, plot_info_fields(row))
        .await?;
        Ok(plot.id)
    }

    async fn import_ownership(&self, account_id: Uuid, row: &OwnershipRow) -> ServiceResult<Uuid> {
        check_ownership_row(row)?;
        let property = self.property_at(account_id, &row.property_address).await?;
        let owner = self
            .owners
            .find_by_name(account_id, row.owner_name.trim())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Owner not found: {}", row.owner_name)))?;
        if self
            .ownerships
            .find_pair(account_id, property.id, owner.id)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("Ownership already exists"));
        }
        let fields = ownership_fields(row, property.id, owner.id);
        Ok(self.ownerships.insert(account_id, &fields).await?.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{
        MemMortgages, MemOwners, MemOwnerships, MemPlots, MemProperties, NoLinks,
    };
    use crate::domain::imports::ImportStatus;
    use crate::infrastructure::imports::history_store::InMemoryImportHistory;
    use serde_json::json;

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
        async fn run(&self, account_id: Uuid, import_type: ImportType, rows: &[Value]) -> ServiceResult<ImportRecord> {
            RunImport {
                properties: &self.properties,
                companies: &NoLinks,
                owners: &self.owners,
                ownerships: &self.ownerships,
                mortgages: &self.mortgages,
                bank_accounts: &NoLinks,
                plot_info: &self.plot_info,
                history: &self.history,
            }
            .execute(account_id, import_type, rows)
            .await
        }
    }

    fn rows_of(errors: &[RowError]) -> Vec<usize> {
        errors.iter().map(|e| e.row).collect()
    }

    #[tokio::test]
    async fn ownerships_resolve_names_and_report_spreadsheet_rows() {
        let stores = Stores::default();
        let account = Uuid::new_v4();
        stores.properties.seed(account, "הרצל 10, תל אביב");
        stores.owners.seed(account, "Yossi Cohen");
        let share = |address: &str, owner: &str| {
            json!({
                "property_address": address,
                "owner_name": owner,
                "ownership_percentage": "50",
                "start_date": "2020-01-01",
            })
        };

        let record = stores
            .run(
                account,
                ImportType::Ownerships,
                &[
                    share(" הרצל 10, תל אביב ", "yossi cohen"),
                    share("הרצל 10, תל אביב", "Yossi Cohen"),
                    share("הרצל 10, תל אביב", "Dana Levi"),
                    share("ביאליק 3, רמת גן", "Yossi Cohen"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(record.status, ImportStatus::Partial);
        assert_eq!((record.successful, record.failed), (1, 3));
        assert_eq!(rows_of(&record.errors), vec![3, 4, 5]);
        assert_eq!(record.errors[0].message, "Ownership already exists");
        assert_eq!(record.errors[1].message, "Owner not found: Dana Levi");
        assert_eq!(record.errors[2].message, "Property not found: ביאליק 3, רמת גן");

        let created = stores.ownerships.all();
        assert_eq!(record.imported_record_ids, vec![created[0].id]);
        assert!(stores.history.get(account, record.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unreadable_and_invalid_rows_fail_alone() {
        let stores = Stores::default();
        let account = Uuid::new_v4();
        let record = stores
            .run(
                account,
                ImportType::Properties,
                &[
                    json!({"address": "   "}),
                    json!({"address": "הרצל 10, תל אביב"}),
                    json!({"city": "Haifa"}),
                    json!({"address": "הרצל 10, תל אביב"}),
                ],
            )
            .await
            .unwrap();

        assert_eq!(rows_of(&record.errors), vec![2, 4, 5]);
        assert!(record.errors[1].message.starts_with("Invalid row:"));
        assert_eq!(record.errors[2].message, "Property already exists: הרצל 10, תל אביב");
        assert_eq!(stores.properties.count(), 1);

        let err = stores.run(account, ImportType::Owners, &[]).await.unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }

    #[tokio::test]
    async fn mortgages_and_plots_attach_to_the_named_property() {
        let stores = Stores::default();
        let account = Uuid::new_v4();
        let property_id = stores.properties.seed(account, "הרצל 10, תל אביב");

        let record = stores
            .run(
                account,
                ImportType::Mortgages,
                &[
                    json!({
                        "property_address": "הרצל 10, תל אביב",
                        "bank": "Leumi",
                        "loan_amount": "900000",
                        "start_date": "2022-01-01",
                    }),
                    json!({
                        "property_address": "ביאליק 3, רמת גן",
                        "bank": "Leumi",
                        "loan_amount": "500000",
                        "start_date": "2022-01-01",
                    }),
                ],
            )
            .await
            .unwrap();
        assert_eq!(rows_of(&record.errors), vec![3]);
        let mortgages = stores.mortgages.all();
        assert_eq!(mortgages.len(), 1);
        assert_eq!(mortgages[0].fields.property_id, property_id);

        let plot = |chelka: &str| {
            json!({"property_address": "הרצל 10, תל אביב", "gush": "6942", "chelka": chelka})
        };
        let record = stores
            .run(account, ImportType::PlotInfo, &[plot("17"), plot("18")])
            .await
            .unwrap();
        assert_eq!(record.successful, 1);
        assert_eq!(rows_of(&record.errors), vec![3]);
        assert_eq!(record.errors[0].message, "Plot info already exists for this property");
        assert_eq!(stores.plot_info.count(), 1);
    }
}
