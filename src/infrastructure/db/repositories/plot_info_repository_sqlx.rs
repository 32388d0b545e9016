use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::plot_info_repository::PlotInfoRepository;
use crate::domain::plot_info::{PlotInfo, PlotInfoFields};
use crate::infrastructure::db::PgPool;

const COLUMNS: &str = "id, account_id, property_id, gush, chelka, sub_chelka, registry_number, \
                       registry_office, notes, created_at, updated_at";

pub struct SqlxPlotInfoRepository {
    pub pool: PgPool,
}

impl SqlxPlotInfoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn plot_info_from_row(r: &PgRow) -> PlotInfo {
    PlotInfo {
        id: r.get("id"),
        account_id: r.get("account_id"),
        property_id: r.get("property_id"),
        fields: PlotInfoFields {
            gush: r.get("gush"),
            chelka: r.get("chelka"),
            sub_chelka: r.get("sub_chelka"),
            registry_number: r.get("registry_number"),
            registry_office: r.get("registry_office"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl PlotInfoRepository for SqlxPlotInfoRepository {
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<PlotInfo>> {
        let sql = format!("SELECT {COLUMNS} FROM plot_info WHERE id = $1 AND account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(plot_info_from_row))
    }

    async fn get_by_property(&self, account_id: Uuid, property_id: Uuid) -> anyhow::Result<Option<PlotInfo>> {
        let sql = format!("SELECT {COLUMNS} FROM plot_info WHERE property_id = $1 AND account_id = $2");
        let row = sqlx::query(&sql)
            .bind(property_id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(plot_info_from_row))
    }

    async fn insert(&self, account_id: Uuid, property_id: Uuid, f: &PlotInfoFields) -> anyhow::Result<PlotInfo> {
        let sql = format!(
            "INSERT INTO plot_info
               (account_id, property_id, gush, chelka, sub_chelka, registry_number, registry_office, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(property_id)
            .bind(&f.gush)
            .bind(&f.chelka)
            .bind(&f.sub_chelka)
            .bind(&f.registry_number)
            .bind(&f.registry_office)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(plot_info_from_row(&row))
    }

    async fn update(&self, account_id: Uuid, id: Uuid, f: &PlotInfoFields) -> anyhow::Result<Option<PlotInfo>> {
        let sql = format!(
            "UPDATE plot_info SET
               gush = $3, chelka = $4, sub_chelka = $5, registry_number = $6,
               registry_office = $7, notes = $8, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(&f.gush)
            .bind(&f.chelka)
            .bind(&f.sub_chelka)
            .bind(&f.registry_number)
            .bind(&f.registry_office)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(plot_info_from_row))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM plot_info WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
