use uuid::Uuid;

use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::bank_account_repository::BankAccountRepository;
use crate::domain::bank_accounts::{BankAccount, BankAccountFields, BankAccountPatch};

const ENTITY: &str = "Bank account";

pub struct ListBankAccounts<'a, R: BankAccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BankAccountRepository + ?Sized> ListBankAccounts<'a, R> {
    pub async fn execute(&self, account_id: Uuid, active_only: bool) -> ServiceResult<Vec<BankAccount>> {
        Ok(self.repo.list(account_id, active_only).await?)
    }
}

pub struct GetBankAccount<'a, R: BankAccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BankAccountRepository + ?Sized> GetBankAccount<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<BankAccount> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

pub struct CreateBankAccount<'a, R: BankAccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BankAccountRepository + ?Sized> CreateBankAccount<'a, R> {
    pub async fn execute(&self, account_id: Uuid, fields: BankAccountFields) -> ServiceResult<BankAccount> {
        fields.validate()?;
        ensure_unique(self.repo, account_id, &fields, None).await?;
        Ok(self.repo.insert(account_id, &fields).await?)
    }
}

pub struct UpdateBankAccount<'a, R: BankAccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BankAccountRepository + ?Sized> UpdateBankAccount<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        id: Uuid,
        patch: BankAccountPatch,
    ) -> ServiceResult<BankAccount> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.fields;
        patch.apply(&mut fields);
        fields.validate()?;
        ensure_unique(self.repo, account_id, &fields, Some(id)).await?;
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct SetBankAccountActive<'a, R: BankAccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BankAccountRepository + ?Sized> SetBankAccountActive<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid, active: bool) -> ServiceResult<BankAccount> {
        let mut fields = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?.fields;
        fields.is_active = active;
        self.repo
            .update(account_id, id, &fields)
            .await?
            .or_not_found(ENTITY)
    }
}

pub struct DeleteBankAccount<'a, R: BankAccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BankAccountRepository + ?Sized> DeleteBankAccount<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        let linked = self.repo.count_mortgages(account_id, id).await?;
        if linked > 0 {
            return Err(ServiceError::conflict(format!(
                "Cannot delete bank account used by {linked} mortgage(s)"
            )));
        }
        self.repo.delete(account_id, id).await?;
        Ok(())
    }
}

async fn ensure_unique<R: BankAccountRepository + ?Sized>(
    repo: &R,
    account_id: Uuid,
    fields: &BankAccountFields,
    exclude: Option<Uuid>,
) -> ServiceResult<()> {
    let dup = repo
        .find_duplicate(account_id, &fields.bank_name, &fields.account_number, exclude)
        .await?;
    match dup {
        Some(_) => Err(ServiceError::conflict(format!(
            "Bank account {} at {} already exists",
            fields.account_number, fields.bank_name
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemBankAccounts {
        rows: Mutex<Vec<BankAccount>>,
        mortgages: Mutex<Vec<Uuid>>,
    }

    #[async_trait]
    impl BankAccountRepository for MemBankAccounts {
        async fn list(&self, account_id: Uuid, active_only: bool) -> anyhow::Result<Vec<BankAccount>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.account_id == account_id && (!active_only || b.fields.is_active))
                .cloned()
                .collect())
        }
        async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<BankAccount>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.account_id == account_id && b.id == id)
                .cloned())
        }
        async fn find_duplicate(
            &self,
            account_id: Uuid,
            bank_name: &str,
            account_number: &str,
            exclude: Option<Uuid>,
        ) -> anyhow::Result<Option<Uuid>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|b| {
                    b.account_id == account_id
                        && b.fields.bank_name == bank_name
                        && b.fields.account_number == account_number
                        && Some(b.id) != exclude
                })
                .map(|b| b.id))
        }
        async fn insert(&self, account_id: Uuid, fields: &BankAccountFields) -> anyhow::Result<BankAccount> {
            let row = BankAccount {
                id: Uuid::new_v4(),
                account_id,
                fields: fields.clone(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }
        async fn update(
            &self,
            account_id: Uuid,
            id: Uuid,
            fields: &BankAccountFields,
        ) -> anyhow::Result<Option<BankAccount>> {
            let mut rows = self.rows.lock().unwrap();
            Ok(rows
                .iter_mut()
                .find(|b| b.account_id == account_id && b.id == id)
                .map(|b| {
                    b.fields = fields.clone();
                    b.clone()
                }))
        }
        async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|b| !(b.account_id == account_id && b.id == id));
            Ok(rows.len() < before)
        }
        async fn count_mortgages(&self, _account_id: Uuid, id: Uuid) -> anyhow::Result<i64> {
            Ok(self.mortgages.lock().unwrap().iter().filter(|m| **m == id).count() as i64)
        }
    }

    fn fields(bank: &str, number: &str) -> BankAccountFields {
        serde_json::from_value(serde_json::json!({
            "bank_name": bank,
            "account_number": number,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn duplicate_bank_and_number_conflicts() {
        let repo = MemBankAccounts::default();
        let account = Uuid::new_v4();
        let uc = CreateBankAccount { repo: &repo };
        uc.execute(account, fields("Leumi", "100")).await.unwrap();
        let err = uc.execute(account, fields("Leumi", "100")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        // Same number at another bank, or in another account, is fine.
        uc.execute(account, fields("Discount", "100")).await.unwrap();
        uc.execute(Uuid::new_v4(), fields("Leumi", "100")).await.unwrap();
    }

    #[tokio::test]
    async fn update_ignores_its_own_row_in_duplicate_check() {
        let repo = MemBankAccounts::default();
        let account = Uuid::new_v4();
        let created = CreateBankAccount { repo: &repo }
            .execute(account, fields("Leumi", "100"))
            .await
            .unwrap();
        let patch: BankAccountPatch = serde_json::from_str(r#"{"notes":"main"}"#).unwrap();
        let updated = UpdateBankAccount { repo: &repo }
            .execute(account, created.id, patch)
            .await
            .unwrap();
        assert_eq!(updated.fields.notes.as_deref(), Some("main"));
    }

    #[tokio::test]
    async fn deleting_an_account_used_by_mortgages_conflicts() {
        let repo = MemBankAccounts::default();
        let account = Uuid::new_v4();
        let created = CreateBankAccount { repo: &repo }
            .execute(account, fields("Leumi", "100"))
            .await
            .unwrap();
        repo.mortgages.lock().unwrap().push(created.id);
        let err = DeleteBankAccount { repo: &repo }
            .execute(account, created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn other_accounts_rows_are_not_found() {
        let repo = MemBankAccounts::default();
        let created = CreateBankAccount { repo: &repo }
            .execute(Uuid::new_v4(), fields("Leumi", "100"))
            .await
            .unwrap();
        let err = GetBankAccount { repo: &repo }
            .execute(Uuid::new_v4(), created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn deactivated_accounts_drop_out_of_the_active_list() {
        let repo = MemBankAccounts::default();
        let account = Uuid::new_v4();
        let created = CreateBankAccount { repo: &repo }
            .execute(account, fields("Leumi", "100"))
            .await
            .unwrap();
        SetBankAccountActive { repo: &repo }
            .execute(account, created.id, false)
            .await
            .unwrap();
        let active = ListBankAccounts { repo: &repo }.execute(account, true).await.unwrap();
        assert!(active.is_empty());
    }
}
