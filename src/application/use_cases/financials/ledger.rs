use uuid::Uuid;

use crate::application::dto::financials::FinancialFilter;
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::financial_repository::FinancialRepository;
use crate::application::ports::property_repository::PropertyRepository;
use crate::domain::financials::{
    Expense, ExpenseFields, ExpensePatch, Income, IncomeFields, IncomePatch,
};

const EXPENSE: &str = "Expense";
const INCOME: &str = "Income";

pub struct ListExpenses<'a, R: FinancialRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FinancialRepository + ?Sized> ListExpenses<'a, R> {
    pub async fn execute(&self, account_id: Uuid, filter: &FinancialFilter) -> ServiceResult<Vec<Expense>> {
        Ok(self.repo.list_expenses(account_id, filter).await?)
    }
}

pub struct CreateExpense<'a, R, P>
where
    R: FinancialRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> CreateExpense<'a, R, P>
where
    R: FinancialRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, fields: ExpenseFields) -> ServiceResult<Expense> {
        fields.validate()?;
        self.properties
            .get(account_id, fields.property_id)
            .await?
            .or_not_found("Property")?;
        Ok(self.repo.insert_expense(account_id, &fields).await?)
    }
}

pub struct UpdateExpense<'a, R: FinancialRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FinancialRepository + ?Sized> UpdateExpense<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid, patch: ExpensePatch) -> ServiceResult<Expense> {
        let mut fields = self
            .repo
            .get_expense(account_id, id)
            .await?
            .or_not_found(EXPENSE)?
            .fields;
        patch.apply(&mut fields);
        fields.validate()?;
        self.repo
            .update_expense(account_id, id, &fields)
            .await?
            .or_not_found(EXPENSE)
    }
}

pub struct DeleteExpense<'a, R: FinancialRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FinancialRepository + ?Sized> DeleteExpense<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        if self.repo.delete_expense(account_id, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(EXPENSE))
        }
    }
}

pub struct ListIncome<'a, R: FinancialRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FinancialRepository + ?Sized> ListIncome<'a, R> {
    pub async fn execute(&self, account_id: Uuid, filter: &FinancialFilter) -> ServiceResult<Vec<Income>> {
        Ok(self.repo.list_income(account_id, filter).await?)
    }
}

pub struct CreateIncome<'a, R, P>
where
    R: FinancialRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub repo: &'a R,
    pub properties: &'a P,
}

impl<'a, R, P> CreateIncome<'a, R, P>
where
    R: FinancialRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, fields: IncomeFields) -> ServiceResult<Income> {
        fields.validate()?;
        self.properties
            .get(account_id, fields.property_id)
            .await?
            .or_not_found("Property")?;
        Ok(self.repo.insert_income(account_id, &fields).await?)
    }
}

pub struct UpdateIncome<'a, R: FinancialRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FinancialRepository + ?Sized> UpdateIncome<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid, patch: IncomePatch) -> ServiceResult<Income> {
        let mut fields = self
            .repo
            .get_income(account_id, id)
            .await?
            .or_not_found(INCOME)?
            .fields;
        patch.apply(&mut fields);
        fields.validate()?;
        self.repo
            .update_income(account_id, id, &fields)
            .await?
            .or_not_found(INCOME)
    }
}

pub struct DeleteIncome<'a, R: FinancialRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FinancialRepository + ?Sized> DeleteIncome<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<()> {
        if self.repo.delete_income(account_id, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(INCOME))
        }
    }
}
