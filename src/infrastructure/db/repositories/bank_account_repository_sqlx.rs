use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::bank_account_repository::BankAccountRepository;
use crate::domain::bank_accounts::{BankAccount, BankAccountFields};
use crate::infrastructure::db::{PgPool, text_col};

const COLUMNS: &str = "id, account_id, bank_name, branch_number, account_number, account_type, \
                       account_holder, notes, is_active, created_at, updated_at";

pub struct SqlxBankAccountRepository {
    pub pool: PgPool,
}

impl SqlxBankAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bank_account_from_row(r: &PgRow) -> anyhow::Result<BankAccount> {
    Ok(BankAccount {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: BankAccountFields {
            bank_name: r.get("bank_name"),
            branch_number: r.get("branch_number"),
            account_number: r.get("account_number"),
            account_type: text_col(r, "account_type")?,
            account_holder: r.get("account_holder"),
            notes: r.get("notes"),
            is_active: r.get("is_active"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl BankAccountRepository for SqlxBankAccountRepository {
    async fn list(&self, account_id: Uuid, active_only: bool) -> anyhow::Result<Vec<BankAccount>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM bank_accounts
             WHERE account_id = $1 AND ($2 = FALSE OR is_active)
             ORDER BY bank_name ASC, created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(bank_account_from_row).collect()
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<BankAccount>> {
        let sql = format!("SELECT {COLUMNS} FROM bank_accounts WHERE id = $1 AND account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(bank_account_from_row).transpose()
    }

    async fn find_duplicate(
        &self,
        account_id: Uuid,
        bank_name: &str,
        account_number: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar(
            r#"SELECT id FROM bank_accounts
               WHERE account_id = $1 AND bank_name = $2 AND account_number = $3
                 AND ($4::uuid IS NULL OR id <> $4)
               LIMIT 1"#,
        )
        .bind(account_id)
        .bind(bank_name)
        .bind(account_number)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert(&self, account_id: Uuid, f: &BankAccountFields) -> anyhow::Result<BankAccount> {
        let sql = format!(
            "INSERT INTO bank_accounts
               (account_id, bank_name, branch_number, account_number, account_type,
                account_holder, notes, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(&f.bank_name)
            .bind(&f.branch_number)
            .bind(&f.account_number)
            .bind(f.account_type.as_str())
            .bind(&f.account_holder)
            .bind(&f.notes)
            .bind(f.is_active)
            .fetch_one(&self.pool)
            .await?;
        bank_account_from_row(&row)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &BankAccountFields,
    ) -> anyhow::Result<Option<BankAccount>> {
        let sql = format!(
            "UPDATE bank_accounts SET
               bank_name = $3, branch_number = $4, account_number = $5, account_type = $6,
               account_holder = $7, notes = $8, is_active = $9, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(&f.bank_name)
            .bind(&f.branch_number)
            .bind(&f.account_number)
            .bind(f.account_type.as_str())
            .bind(&f.account_holder)
            .bind(&f.notes)
            .bind(f.is_active)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(bank_account_from_row).transpose()
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM bank_accounts WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_mortgages(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM mortgages WHERE account_id = $1 AND bank_account_id = $2",
        )
        .bind(account_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }
}
