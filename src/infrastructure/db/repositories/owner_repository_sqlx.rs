use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::owners::OwnerListItem;
use crate::application::dto::pagination::PageRequest;
use crate::application::ports::owner_repository::OwnerRepository;
use crate::domain::owners::{Owner, OwnerFields};
use crate::infrastructure::db::repositories::property_repository_sqlx::like_pattern;
use crate::infrastructure::db::{PgPool, text_col};

const COLUMNS: &str = "id, account_id, name, owner_type, id_number, email, phone, address, notes, \
                       created_at, updated_at";

pub struct SqlxOwnerRepository {
    pub pool: PgPool,
}

impl SqlxOwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn owner_from_row(r: &PgRow) -> anyhow::Result<Owner> {
    Ok(Owner {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: OwnerFields {
            name: r.get("name"),
            owner_type: text_col(r, "owner_type")?,
            id_number: r.get("id_number"),
            email: r.get("email"),
            phone: r.get("phone"),
            address: r.get("address"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl OwnerRepository for SqlxOwnerRepository {
    async fn list(
        &self,
        account_id: Uuid,
        search: Option<&str>,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<OwnerListItem>, i64)> {
        let pattern = search.map(like_pattern);
        let rows = sqlx::query(
            r#"SELECT o.*,
                      (SELECT COUNT(*) FROM property_ownerships po
                         WHERE po.owner_id = o.id)::BIGINT AS ownership_count
               FROM owners o
               WHERE o.account_id = $1
                 AND ($2::text IS NULL OR o.name ILIKE $2 ESCAPE '\' OR o.email ILIKE $2 ESCAPE '\' OR o.phone ILIKE $2 ESCAPE '\')
               ORDER BY o.created_at DESC
               LIMIT $3 OFFSET $4"#,
        )
        .bind(account_id)
        .bind(&pattern)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*)::BIGINT FROM owners o
               WHERE o.account_id = $1
                 AND ($2::text IS NULL OR o.name ILIKE $2 ESCAPE '\' OR o.email ILIKE $2 ESCAPE '\' OR o.phone ILIKE $2 ESCAPE '\')"#,
        )
        .bind(account_id)
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;
        let items = rows
            .iter()
            .map(|r| {
                Ok(OwnerListItem {
                    owner: owner_from_row(r)?,
                    ownership_count: r.get("ownership_count"),
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Owner>> {
        let sql = format!("SELECT {COLUMNS} FROM owners WHERE id = $1 AND account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(owner_from_row).transpose()
    }

    async fn find_by_name(&self, account_id: Uuid, name: &str) -> anyhow::Result<Option<Owner>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM owners
             WHERE account_id = $1 AND lower(trim(name)) = lower(trim($2))
             ORDER BY created_at ASC
             LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(owner_from_row).transpose()
    }

    async fn find_by_email(
        &self,
        account_id: Uuid,
        email: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar(
            r#"SELECT id FROM owners
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

    async fn insert(&self, account_id: Uuid, f: &OwnerFields) -> anyhow::Result<Owner> {
        let sql = format!(
            "INSERT INTO owners
               (account_id, name, owner_type, id_number, email, phone, address, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(&f.name)
            .bind(f.owner_type.as_str())
            .bind(&f.id_number)
            .bind(&f.email)
            .bind(&f.phone)
            .bind(&f.address)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        owner_from_row(&row)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &OwnerFields,
    ) -> anyhow::Result<Option<Owner>> {
        let sql = format!(
            "UPDATE owners SET
               name = $3, owner_type = $4, id_number = $5, email = $6, phone = $7,
               address = $8, notes = $9, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(&f.name)
            .bind(f.owner_type.as_str())
            .bind(&f.id_number)
            .bind(&f.email)
            .bind(&f.phone)
            .bind(&f.address)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(owner_from_row).transpose()
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM owners WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_ownerships(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM property_ownerships WHERE account_id = $1 AND owner_id = $2",
        )
        .bind(account_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }
}
