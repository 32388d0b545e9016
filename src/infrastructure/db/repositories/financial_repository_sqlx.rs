use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::financials::FinancialFilter;
use crate::application::ports::financial_repository::FinancialRepository;
use crate::domain::financials::{Expense, ExpenseFields, Income, IncomeFields};
use crate::infrastructure::db::{PgPool, text_col};

const EXPENSE_COLUMNS: &str = "id, account_id, property_id, expense_date, amount, expense_type, \
                               category, description, payment_method, created_at";

const INCOME_COLUMNS: &str =
    "id, account_id, property_id, income_date, amount, income_type, source, description, created_at";

pub struct SqlxFinancialRepository {
    pub pool: PgPool,
}

impl SqlxFinancialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn expense_from_row(r: &PgRow) -> anyhow::Result<Expense> {
    Ok(Expense {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: ExpenseFields {
            property_id: r.get("property_id"),
            expense_date: r.get("expense_date"),
            amount: r.get("amount"),
            expense_type: text_col(r, "expense_type")?,
            category: r.get("category"),
            description: r.get("description"),
            payment_method: r.get("payment_method"),
        },
        created_at: r.get("created_at"),
    })
}

fn income_from_row(r: &PgRow) -> anyhow::Result<Income> {
    Ok(Income {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: IncomeFields {
            property_id: r.get("property_id"),
            income_date: r.get("income_date"),
            amount: r.get("amount"),
            income_type: text_col(r, "income_type")?,
            source: r.get("source"),
            description: r.get("description"),
        },
        created_at: r.get("created_at"),
    })
}

#[async_trait]
impl FinancialRepository for SqlxFinancialRepository {
    async fn list_expenses(
        &self,
        account_id: Uuid,
        f: &FinancialFilter,
    ) -> anyhow::Result<Vec<Expense>> {
        let sql = format!(
            "SELECT {EXPENSE_COLUMNS} FROM property_expenses
             WHERE account_id = $1
               AND ($2::uuid IS NULL OR property_id = $2)
               AND ($3::date IS NULL OR expense_date >= $3)
               AND ($4::date IS NULL OR expense_date <= $4)
               AND ($5::text IS NULL OR expense_type = $5)
             ORDER BY expense_date DESC, created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(f.expense_type.map(|t| t.as_str()))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(expense_from_row).collect()
    }

    async fn get_expense(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Expense>> {
        let sql = format!(
            "SELECT {EXPENSE_COLUMNS} FROM property_expenses WHERE id = $1 AND account_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(expense_from_row).transpose()
    }

    async fn insert_expense(
        &self,
        account_id: Uuid,
        f: &ExpenseFields,
    ) -> anyhow::Result<Expense> {
        let sql = format!(
            "INSERT INTO property_expenses
               (account_id, property_id, expense_date, amount, expense_type, category,
                description, payment_method)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {EXPENSE_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.expense_date)
            .bind(f.amount)
            .bind(f.expense_type.as_str())
            .bind(&f.category)
            .bind(&f.description)
            .bind(&f.payment_method)
            .fetch_one(&self.pool)
            .await?;
        expense_from_row(&row)
    }

    async fn update_expense(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &ExpenseFields,
    ) -> anyhow::Result<Option<Expense>> {
        let sql = format!(
            "UPDATE property_expenses SET
               property_id = $3, expense_date = $4, amount = $5, expense_type = $6,
               category = $7, description = $8, payment_method = $9
             WHERE id = $1 AND account_id = $2
             RETURNING {EXPENSE_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.expense_date)
            .bind(f.amount)
            .bind(f.expense_type.as_str())
            .bind(&f.category)
            .bind(&f.description)
            .bind(&f.payment_method)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(expense_from_row).transpose()
    }

    async fn delete_expense(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM property_expenses WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_income(
        &self,
        account_id: Uuid,
        f: &FinancialFilter,
    ) -> anyhow::Result<Vec<Income>> {
        let sql = format!(
            "SELECT {INCOME_COLUMNS} FROM property_income
             WHERE account_id = $1
               AND ($2::uuid IS NULL OR property_id = $2)
               AND ($3::date IS NULL OR income_date >= $3)
               AND ($4::date IS NULL OR income_date <= $4)
               AND ($5::text IS NULL OR income_type = $5)
             ORDER BY income_date DESC, created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(f.income_type.map(|t| t.as_str()))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(income_from_row).collect()
    }

    async fn get_income(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Income>> {
        let sql = format!(
            "SELECT {INCOME_COLUMNS} FROM property_income WHERE id = $1 AND account_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(income_from_row).transpose()
    }

    async fn insert_income(&self, account_id: Uuid, f: &IncomeFields) -> anyhow::Result<Income> {
        let sql = format!(
            "INSERT INTO property_income
               (account_id, property_id, income_date, amount, income_type, source, description)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {INCOME_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.income_date)
            .bind(f.amount)
            .bind(f.income_type.as_str())
            .bind(&f.source)
            .bind(&f.description)
            .fetch_one(&self.pool)
            .await?;
        income_from_row(&row)
    }

    async fn update_income(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &IncomeFields,
    ) -> anyhow::Result<Option<Income>> {
        let sql = format!(
            "UPDATE property_income SET
               property_id = $3, income_date = $4, amount = $5, income_type = $6,
               source = $7, description = $8
             WHERE id = $1 AND account_id = $2
             RETURNING {INCOME_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.income_date)
            .bind(f.amount)
            .bind(f.income_type.as_str())
            .bind(&f.source)
            .bind(&f.description)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(income_from_row).transpose()
    }

    async fn delete_income(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM property_income WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
