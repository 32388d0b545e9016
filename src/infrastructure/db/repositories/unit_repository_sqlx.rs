use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::units::{UnitFilter, UnitRecord};
use crate::application::ports::unit_repository::UnitRepository;
use crate::domain::units::{Unit, UnitFields};
use crate::infrastructure::db::repositories::property_repository_sqlx::like_pattern;
use crate::infrastructure::db::{PgPool, text_col};

const COLUMNS: &str = "id, account_id, property_id, apartment_number, floor, room_count, \
                       unit_type, area, occupancy_status, is_occupied, current_rent, notes, \
                       created_at, updated_at";

const JOINED: &str = "SELECT u.*, p.address AS property_address
                      FROM units u
                      JOIN properties p ON p.id = u.property_id";

pub struct SqlxUnitRepository {
    pub pool: PgPool,
}

impl SqlxUnitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unit_from_row(r: &PgRow) -> anyhow::Result<Unit> {
    Ok(Unit {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: UnitFields {
            property_id: r.get("property_id"),
            apartment_number: r.get("apartment_number"),
            floor: r.get("floor"),
            room_count: r.get("room_count"),
            unit_type: text_col(r, "unit_type")?,
            area: r.get("area"),
            occupancy_status: text_col(r, "occupancy_status")?,
            is_occupied: r.get("is_occupied"),
            current_rent: r.get("current_rent"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn record_from_row(r: &PgRow) -> anyhow::Result<UnitRecord> {
    Ok(UnitRecord {
        unit: unit_from_row(r)?,
        property_address: r.get("property_address"),
    })
}

#[async_trait]
impl UnitRepository for SqlxUnitRepository {
    async fn list(&self, account_id: Uuid, f: &UnitFilter) -> anyhow::Result<Vec<UnitRecord>> {
        let sql = format!(
            "{JOINED}
             WHERE u.account_id = $1
               AND ($2::uuid IS NULL OR u.property_id = $2)
               AND ($3::text IS NULL OR u.unit_type = $3)
               AND ($4::integer IS NULL OR u.floor = $4)
               AND ($5::integer IS NULL OR u.room_count = $5)
               AND ($6::text IS NULL OR u.occupancy_status = $6)
               AND ($7::text IS NULL OR u.apartment_number ILIKE $7 ESCAPE '\\' OR p.address ILIKE $7 ESCAPE '\\')
             ORDER BY p.address ASC, u.apartment_number ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(f.unit_type.map(|t| t.as_str()))
            .bind(f.floor)
            .bind(f.room_count)
            .bind(f.occupancy_status.map(|s| s.as_str()))
            .bind(f.search.as_deref().map(like_pattern))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<UnitRecord>> {
        let sql = format!("{JOINED} WHERE u.id = $1 AND u.account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn find_by_number(
        &self,
        account_id: Uuid,
        property_id: Uuid,
        apartment_number: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar(
            r#"SELECT id FROM units
               WHERE account_id = $1 AND property_id = $2 AND apartment_number = $3
                 AND ($4::uuid IS NULL OR id <> $4)
               LIMIT 1"#,
        )
        .bind(account_id)
        .bind(property_id)
        .bind(apartment_number)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert(&self, account_id: Uuid, f: &UnitFields) -> anyhow::Result<Unit> {
        let sql = format!(
            "INSERT INTO units
               (account_id, property_id, apartment_number, floor, room_count, unit_type,
                area, occupancy_status, is_occupied, current_rent, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(&f.apartment_number)
            .bind(f.floor)
            .bind(f.room_count)
            .bind(f.unit_type.as_str())
            .bind(f.area)
            .bind(f.occupancy_status.as_str())
            .bind(f.is_occupied)
            .bind(f.current_rent)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        unit_from_row(&row)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &UnitFields,
    ) -> anyhow::Result<Option<Unit>> {
        let sql = format!(
            "UPDATE units SET
               property_id = $3, apartment_number = $4, floor = $5, room_count = $6,
               unit_type = $7, area = $8, occupancy_status = $9, is_occupied = $10,
               current_rent = $11, notes = $12, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(f.property_id)
            .bind(&f.apartment_number)
            .bind(f.floor)
            .bind(f.room_count)
            .bind(f.unit_type.as_str())
            .bind(f.area)
            .bind(f.occupancy_status.as_str())
            .bind(f.is_occupied)
            .bind(f.current_rent)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(unit_from_row).transpose()
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM units WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_leases(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM leases WHERE account_id = $1 AND unit_id = $2",
        )
        .bind(account_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }
}
