use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::owners::OwnershipRecord;
use crate::application::ports::ownership_repository::OwnershipRepository;
use crate::domain::ownerships::{Ownership, OwnershipFields};
use crate::infrastructure::db::{PgPool, text_col};

const COLUMNS: &str = "id, account_id, property_id, owner_id, ownership_percentage, ownership_type, \
                       start_date, end_date, notes, created_at, updated_at";

const JOINED: &str = "SELECT po.*, o.name AS owner_name, p.address AS property_address
                      FROM property_ownerships po
                      JOIN owners o ON o.id = po.owner_id
                      JOIN properties p ON p.id = po.property_id";

pub struct SqlxOwnershipRepository {
    pub pool: PgPool,
}

impl SqlxOwnershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn records(
        &self,
        column: &str,
        account_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Vec<OwnershipRecord>> {
        let sql = format!(
            "{JOINED}
             WHERE po.account_id = $1 AND po.{column} = $2
             ORDER BY po.start_date DESC, po.created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }
}

fn ownership_from_row(r: &PgRow) -> anyhow::Result<Ownership> {
    Ok(Ownership {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: OwnershipFields {
            property_id: r.get("property_id"),
            owner_id: r.get("owner_id"),
            ownership_percentage: r.get("ownership_percentage"),
            ownership_type: text_col(r, "ownership_type")?,
            start_date: r.get("start_date"),
            end_date: r.get("end_date"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn record_from_row(r: &PgRow) -> anyhow::Result<OwnershipRecord> {
    Ok(OwnershipRecord {
        ownership: ownership_from_row(r)?,
        owner_name: r.get("owner_name"),
        property_address: r.get("property_address"),
    })
}

#[async_trait]
impl OwnershipRepository for SqlxOwnershipRepository {
    async fn list_for_property(
        &self,
        account_id: Uuid,
        property_id: Uuid,
    ) -> anyhow::Result<Vec<OwnershipRecord>> {
        self.records("property_id", account_id, property_id).await
    }

    async fn list_for_owner(
        &self,
        account_id: Uuid,
        owner_id: Uuid,
    ) -> anyhow::Result<Vec<OwnershipRecord>> {
        self.records("owner_id", account_id, owner_id).await
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Ownership>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM property_ownerships WHERE id = $1 AND account_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(ownership_from_row).transpose()
    }

    async fn find_pair(
        &self,
        account_id: Uuid,
        property_id: Uuid,
        owner_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar(
            r#"SELECT id FROM property_ownerships
               WHERE account_id = $1 AND property_id = $2 AND owner_id = $3
               LIMIT 1"#,
        )
        .bind(account_id)
        .bind(property_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert(&self, account_id: Uuid, f: &OwnershipFields) -> anyhow::Result<Ownership> {
        let sql = format!(
            "INSERT INTO property_ownerships
               (account_id, property_id, owner_id, ownership_percentage, ownership_type,
                start_date, end_date, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.owner_id)
            .bind(f.ownership_percentage)
            .bind(f.ownership_type.as_str())
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        ownership_from_row(&row)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &OwnershipFields,
    ) -> anyhow::Result<Option<Ownership>> {
        let sql = format!(
            "UPDATE property_ownerships SET
               property_id = $3, owner_id = $4, ownership_percentage = $5, ownership_type = $6,
               start_date = $7, end_date = $8, notes = $9, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.owner_id)
            .bind(f.ownership_percentage)
            .bind(f.ownership_type.as_str())
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(ownership_from_row).transpose()
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM property_ownerships WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
