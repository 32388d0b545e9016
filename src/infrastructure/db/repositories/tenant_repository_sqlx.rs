use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::tenant_repository::TenantRepository;
use crate::domain::tenants::{Tenant, TenantFields};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::repositories::property_repository_sqlx::like_pattern;

const COLUMNS: &str = "id, account_id, name, email, phone, notes, created_at, updated_at";

pub struct SqlxTenantRepository {
    pub pool: PgPool,
}

impl SqlxTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn tenant_from_row(r: &PgRow) -> Tenant {
    Tenant {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: TenantFields {
            name: r.get("name"),
            email: r.get("email"),
            phone: r.get("phone"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl TenantRepository for SqlxTenantRepository {
    async fn search(&self, account_id: Uuid, search: Option<&str>) -> anyhow::Result<Vec<Tenant>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM tenants
             WHERE account_id = $1
               AND ($2::text IS NULL OR name ILIKE $2 ESCAPE '\\' OR email ILIKE $2 ESCAPE '\\' OR phone ILIKE $2 ESCAPE '\\')
             ORDER BY name ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(search.map(like_pattern))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(tenant_from_row).collect())
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Tenant>> {
        let sql = format!("SELECT {COLUMNS} FROM tenants WHERE id = $1 AND account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(tenant_from_row))
    }

    async fn find_by_email(
        &self,
        account_id: Uuid,
        email: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar(
            r#"SELECT id FROM tenants
               WHERE account_id = $1 AND lower(email) = lower($2)
                 AND ($3::uuid IS NULL OR id <> $3)
               LIMIT 1"#,
        )
        .bind(account_id)
        .bind(email)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert(&self, account_id: Uuid, f: &TenantFields) -> anyhow::Result<Tenant> {
        let sql = format!(
            "INSERT INTO tenants (account_id, name, email, phone, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(&f.name)
            .bind(&f.email)
            .bind(&f.phone)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(tenant_from_row(&row))
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &TenantFields,
    ) -> anyhow::Result<Option<Tenant>> {
        let sql = format!(
            "UPDATE tenants SET name = $3, email = $4, phone = $5, notes = $6, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(&f.name)
            .bind(&f.email)
            .bind(&f.phone)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(tenant_from_row))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM tenants WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
