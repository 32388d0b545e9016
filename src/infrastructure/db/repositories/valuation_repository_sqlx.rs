use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::valuation_repository::ValuationRepository;
use crate::domain::valuations::{Valuation, ValuationFields};
use crate::infrastructure::db::{PgPool, text_col};

const COLUMNS: &str = "id, account_id, property_id, valuation_date, estimated_value, \
                       valuation_type, valued_by, notes, created_at";

pub struct SqlxValuationRepository {
    pub pool: PgPool,
}

impl SqlxValuationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn valuation_from_row(r: &PgRow) -> anyhow::Result<Valuation> {
    Ok(Valuation {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: ValuationFields {
            property_id: r.get("property_id"),
            valuation_date: r.get("valuation_date"),
            estimated_value: r.get("estimated_value"),
            valuation_type: text_col(r, "valuation_type")?,
            valued_by: r.get("valued_by"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
    })
}

#[async_trait]
impl ValuationRepository for SqlxValuationRepository {
    async fn list_for_property(
        &self,
        account_id: Uuid,
        property_id: Uuid,
    ) -> anyhow::Result<Vec<Valuation>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM property_valuations
             WHERE account_id = $1 AND property_id = $2
             ORDER BY valuation_date DESC, created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(property_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(valuation_from_row).collect()
    }

    async fn latest_for_property(
        &self,
        account_id: Uuid,
        property_id: Uuid,
    ) -> anyhow::Result<Option<Valuation>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM property_valuations
             WHERE account_id = $1 AND property_id = $2
             ORDER BY valuation_date DESC, created_at DESC
             LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(valuation_from_row).transpose()
    }

    async fn latest_values(&self, account_id: Uuid) -> anyhow::Result<Vec<(Uuid, Decimal)>> {
        let rows = sqlx::query(
            r#"SELECT DISTINCT ON (property_id) property_id, estimated_value
               FROM property_valuations
               WHERE account_id = $1
               ORDER BY property_id, valuation_date DESC, created_at DESC"#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| (r.get("property_id"), r.get("estimated_value")))
            .collect())
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Valuation>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM property_valuations WHERE id = $1 AND account_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(valuation_from_row).transpose()
    }

    async fn list_between(
        &self,
        account_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<Valuation>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM property_valuations
             WHERE account_id = $1
               AND ($2::date IS NULL OR valuation_date >= $2)
               AND ($3::date IS NULL OR valuation_date <= $3)
             ORDER BY valuation_date ASC, created_at ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(valuation_from_row).collect()
    }

    async fn insert(&self, account_id: Uuid, f: &ValuationFields) -> anyhow::Result<Valuation> {
        let sql = format!(
            "INSERT INTO property_valuations
               (account_id, property_id, valuation_date, estimated_value, valuation_type,
                valued_by, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.valuation_date)
            .bind(f.estimated_value)
            .bind(f.valuation_type.as_str())
            .bind(&f.valued_by)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        valuation_from_row(&row)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &ValuationFields,
    ) -> anyhow::Result<Option<Valuation>> {
        let sql = format!(
            "UPDATE property_valuations SET
               property_id = $3, valuation_date = $4, estimated_value = $5,
               valuation_type = $6, valued_by = $7, notes = $8
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.valuation_date)
            .bind(f.estimated_value)
            .bind(f.valuation_type.as_str())
            .bind(&f.valued_by)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(valuation_from_row).transpose()
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM property_valuations WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
