use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::financials::FinancialFilter;
use crate::domain::financials::{Expense, ExpenseFields, Income, IncomeFields};

#[async_trait]
pub trait FinancialRepository: Send + Sync {
    async fn list_expenses(
        &self,
        account_id: Uuid,
        filter: &FinancialFilter,
    ) -> anyhow::Result<Vec<Expense>>;
    async fn get_expense(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Expense>>;
    async fn insert_expense(
        &self,
        account_id: Uuid,
        fields: &ExpenseFields,
    ) -> anyhow::Result<Expense>;
    async fn update_expense(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &ExpenseFields,
    ) -> anyhow::Result<Option<Expense>>;
    async fn delete_expense(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;

    async fn list_income(
        &self,
        account_id: Uuid,
        filter: &FinancialFilter,
    ) -> anyhow::Result<Vec<Income>>;
    async fn get_income(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Income>>;
    async fn insert_income(&self, account_id: Uuid, fields: &IncomeFields)
    -> anyhow::Result<Income>;
    async fn update_income(
        &self,
        account_id: Uuid,
        id: Uuid,
        fields: &IncomeFields,
    ) -> anyhow::Result<Option<Income>>;
    async fn delete_income(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
}
