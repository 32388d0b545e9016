use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::bank_accounts::{BankAccount, BankAccountFields};

#[async_trait]
pub trait BankAccountRepository: Send + Sync {
    async fn list(&self, account_id: Uuid, active_only: bool) -> anyhow::Result<Vec<BankAccount>>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<BankAccount>>;
    /// Id of another bank account with the same bank and number, if any.
    async fn find_duplicate(
        &self,
        account_id: Uuid,
        bank_name: &str,
        account_number: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>>;
    async fn insert(
        &self,
        account_id: Uuid,
        fields: &BankAccountFields,
    ) -> anyhow::Result<BankAccount>;
    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &BankAccountFields,
    ) -> anyhow::Result<Option<BankAccount>>;
    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
    async fn count_mortgages(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64>;
}
