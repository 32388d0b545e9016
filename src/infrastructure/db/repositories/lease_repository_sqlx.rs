use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::leases::{LeaseFilter, LeaseRecord};
use crate::application::dto::pagination::PageRequest;
use crate::application::ports::lease_repository::LeaseRepository;
use crate::domain::leases::{Lease, LeaseFields, LeaseStatus};
use crate::infrastructure::db::repositories::property_repository_sqlx::like_pattern;
use crate::infrastructure::db::{PgPool, text_col};

const COLUMNS: &str = "id, account_id, unit_id, tenant_id, start_date, end_date, monthly_rent, \
                       payment_to, status, notes, created_at, updated_at";

const JOINED: &str = "SELECT l.*, u.apartment_number, u.property_id,
                             p.address AS property_address, t.name AS tenant_name
                      FROM leases l
                      JOIN units u ON u.id = l.unit_id
                      JOIN properties p ON p.id = u.property_id
                      JOIN tenants t ON t.id = l.tenant_id";

const FILTER: &str = "l.account_id = $1
    AND ($2::text IS NULL OR p.address ILIKE $2 ESCAPE '\\' OR t.name ILIKE $2 ESCAPE '\\')
    AND ($3::text IS NULL OR l.status = $3)
    AND ($4::uuid IS NULL OR u.property_id = $4)
    AND ($5::uuid IS NULL OR l.unit_id = $5)
    AND ($6::uuid IS NULL OR l.tenant_id = $6)
    AND ($7::date IS NULL OR l.start_date >= $7)
    AND ($8::date IS NULL OR l.start_date <= $8)
    AND ($9::date IS NULL OR l.end_date >= $9)
    AND ($10::date IS NULL OR l.end_date <= $10)
    AND ($11::numeric IS NULL OR l.monthly_rent >= $11)
    AND ($12::numeric IS NULL OR l.monthly_rent <= $12)";

const OPEN: &str = "('FUTURE', 'ACTIVE')";

pub struct SqlxLeaseRepository {
    pub pool: PgPool,
}

impl SqlxLeaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn lease_from_row(r: &PgRow) -> anyhow::Result<Lease> {
    Ok(Lease {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: LeaseFields {
            unit_id: r.get("unit_id"),
            tenant_id: r.get("tenant_id"),
            start_date: r.get("start_date"),
            end_date: r.get("end_date"),
            monthly_rent: r.get("monthly_rent"),
            payment_to: r.get("payment_to"),
            notes: r.get("notes"),
        },
        status: text_col(r, "status")?,
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn record_from_row(r: &PgRow) -> anyhow::Result<LeaseRecord> {
    Ok(LeaseRecord {
        lease: lease_from_row(r)?,
        apartment_number: r.get("apartment_number"),
        property_id: r.get("property_id"),
        property_address: r.get("property_address"),
        tenant_name: r.get("tenant_name"),
    })
}

fn status_texts(statuses: &[LeaseStatus]) -> Vec<&'static str> {
    statuses.iter().map(|s| s.as_str()).collect()
}

#[async_trait]
impl LeaseRepository for SqlxLeaseRepository {
    async fn list(
        &self,
        account_id: Uuid,
        f: &LeaseFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<LeaseRecord>, i64)> {
        let sql = format!(
            "{JOINED} WHERE {FILTER} ORDER BY l.start_date DESC, l.created_at DESC LIMIT $13 OFFSET $14"
        );
        let count_sql = format!(
            "SELECT COUNT(*)::BIGINT FROM leases l
             JOIN units u ON u.id = l.unit_id
             JOIN properties p ON p.id = u.property_id
             JOIN tenants t ON t.id = l.tenant_id
             WHERE {FILTER}"
        );
        let search = f.search.as_deref().map(like_pattern);
        let status = f.status.map(|s| s.as_str());

        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(&search)
            .bind(status)
            .bind(f.property_id)
            .bind(f.unit_id)
            .bind(f.tenant_id)
            .bind(f.start_date_from)
            .bind(f.start_date_to)
            .bind(f.end_date_from)
            .bind(f.end_date_to)
            .bind(f.min_rent)
            .bind(f.max_rent)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(account_id)
            .bind(&search)
            .bind(status)
            .bind(f.property_id)
            .bind(f.unit_id)
            .bind(f.tenant_id)
            .bind(f.start_date_from)
            .bind(f.start_date_to)
            .bind(f.end_date_from)
            .bind(f.end_date_to)
            .bind(f.min_rent)
            .bind(f.max_rent)
            .fetch_one(&self.pool)
            .await?;
        let items = rows.iter().map(record_from_row).collect::<anyhow::Result<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<LeaseRecord>> {
        let sql = format!("{JOINED} WHERE l.id = $1 AND l.account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn list_for_tenant(&self, account_id: Uuid, tenant_id: Uuid) -> anyhow::Result<Vec<Lease>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM leases
             WHERE account_id = $1 AND tenant_id = $2
             ORDER BY start_date DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(lease_from_row).collect()
    }

    async fn list_for_units(
        &self,
        account_id: Uuid,
        unit_ids: &[Uuid],
        statuses: &[LeaseStatus],
    ) -> anyhow::Result<Vec<Lease>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM leases
             WHERE account_id = $1 AND unit_id = ANY($2) AND status = ANY($3)
             ORDER BY start_date DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(unit_ids)
            .bind(status_texts(statuses))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(lease_from_row).collect()
    }

    async fn find_overlapping(
        &self,
        account_id: Uuid,
        unit_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Vec<Uuid>> {
        let sql = format!(
            "SELECT id FROM leases
             WHERE account_id = $1 AND unit_id = $2 AND status IN {OPEN}
               AND start_date <= $4 AND $3 <= end_date
               AND ($5::uuid IS NULL OR id <> $5)"
        );
        let ids = sqlx::query_scalar(&sql)
            .bind(account_id)
            .bind(unit_id)
            .bind(start)
            .bind(end)
            .bind(exclude)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }

    async fn count_open_for_tenant(&self, account_id: Uuid, tenant_id: Uuid) -> anyhow::Result<i64> {
        let sql = format!(
            "SELECT COUNT(*)::BIGINT FROM leases
             WHERE account_id = $1 AND tenant_id = $2 AND status IN {OPEN}"
        );
        let n: i64 = sqlx::query_scalar(&sql)
            .bind(account_id)
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn list_refreshable(&self, account_id: Uuid) -> anyhow::Result<Vec<Lease>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM leases WHERE account_id = $1 AND status <> 'TERMINATED'"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(lease_from_row).collect()
    }

    async fn list_expiring(
        &self,
        account_id: Uuid,
        until: NaiveDate,
    ) -> anyhow::Result<Vec<LeaseRecord>> {
        let sql = format!(
            "{JOINED}
             WHERE l.account_id = $1 AND l.status IN {OPEN} AND l.end_date <= $2
             ORDER BY l.end_date ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(until)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn list_ending_on(&self, account_id: Uuid, date: NaiveDate) -> anyhow::Result<Vec<Lease>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM leases
             WHERE account_id = $1 AND status IN {OPEN} AND end_date = $2"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(lease_from_row).collect()
    }

    async fn insert(
        &self,
        account_id: Uuid,
        f: &LeaseFields,
        status: LeaseStatus,
    ) -> anyhow::Result<Lease> {
        let sql = format!(
            "INSERT INTO leases
               (account_id, unit_id, tenant_id, start_date, end_date, monthly_rent,
                payment_to, status, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.unit_id)
            .bind(f.tenant_id)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(f.monthly_rent)
            .bind(&f.payment_to)
            .bind(status.as_str())
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        lease_from_row(&row)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &LeaseFields,
        status: LeaseStatus,
    ) -> anyhow::Result<Option<Lease>> {
        let sql = format!(
            "UPDATE leases SET
               unit_id = $3, tenant_id = $4, start_date = $5, end_date = $6,
               monthly_rent = $7, payment_to = $8, status = $9, notes = $10, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(f.unit_id)
            .bind(f.tenant_id)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(f.monthly_rent)
            .bind(&f.payment_to)
            .bind(status.as_str())
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(lease_from_row).transpose()
    }

    async fn set_status(
        &self,
        account_id: Uuid,
        id: Uuid,
        status: LeaseStatus,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "UPDATE leases SET status = $3, updated_at = now() WHERE id = $1 AND account_id = $2",
        )
        .bind(id)
        .bind(account_id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM leases WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
