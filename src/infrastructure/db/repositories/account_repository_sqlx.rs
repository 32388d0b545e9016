use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::account_repository::AccountRepository;
use crate::domain::accounts::{Account, AccountStatus};
use crate::infrastructure::db::{PgPool, text_col};

pub struct SqlxAccountRepository {
    pub pool: PgPool,
}

impl SqlxAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(r: &PgRow) -> anyhow::Result<Account> {
    Ok(Account {
        id: r.get("id"),
        name: r.get("name"),
        status: text_col(r, "status")?,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    async fn list(&self) -> anyhow::Result<Vec<Account>> {
        let rows = sqlx::query(
            r#"SELECT id, name, status, created_at, updated_at
               FROM accounts
               ORDER BY created_at ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(account_from_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Account>> {
        let row = sqlx::query(
            r#"SELECT id, name, status, created_at, updated_at
               FROM accounts WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn create(&self, id: Uuid, name: &str, status: AccountStatus) -> anyhow::Result<Account> {
        let row = sqlx::query(
            r#"INSERT INTO accounts (id, name, status)
               VALUES ($1, $2, $3)
               RETURNING id, name, status, created_at, updated_at"#,
        )
        .bind(id)
        .bind(name)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;
        account_from_row(&row)
    }
}
