use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::Postgres;
use uuid::Uuid;

use crate::application::dto::pagination::PageRequest;
use crate::application::dto::properties::{PropertyFilter, PropertyListItem};
use crate::application::ports::property_repository::{OccupancyCounts, PropertyRepository};
use crate::domain::properties::{Property, PropertyFields};
use crate::infrastructure::db::{PgPool, opt_text_col};

const COLUMNS: &str = "id, account_id, address, file_number, property_type, status, country, city, \
                       total_area, land_area, estimated_value, last_valuation_date, \
                       investment_company_id, is_mortgaged, acquisition_price, acquisition_date, \
                       is_sold, sale_date, sale_price, is_partial_ownership, \
                       shared_ownership_percentage, notes, created_at, updated_at";

// $1 is the account; $2..$12 follow the order of `bind_filter`.
const FILTER: &str = "p.account_id = $1
    AND ($2::text IS NULL OR p.address ILIKE $2 ESCAPE '\\' OR p.file_number ILIKE $2 ESCAPE '\\')
    AND ($3::text IS NULL OR p.property_type = $3)
    AND ($4::text IS NULL OR p.status = $4)
    AND ($5::text IS NULL OR p.city ILIKE $5 ESCAPE '\\')
    AND ($6::text IS NULL OR p.country = $6)
    AND ($7::boolean IS NULL OR p.is_mortgaged = $7)
    AND ($8::uuid IS NULL OR p.investment_company_id = $8)
    AND ($9::numeric IS NULL OR p.estimated_value >= $9)
    AND ($10::numeric IS NULL OR p.estimated_value <= $10)
    AND ($11::numeric IS NULL OR p.total_area >= $11)
    AND ($12::numeric IS NULL OR p.total_area <= $12)";

pub struct SqlxPropertyRepository {
    pub pool: PgPool,
}

impl SqlxPropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Substring pattern for `ILIKE .. ESCAPE '\'`. Wildcards in the input match literally.
pub(crate) fn like_pattern(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('%');
    for c in s.trim().chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn bind_filter<'q>(
    q: Query<'q, Postgres, PgArguments>,
    account_id: Uuid,
    f: &'q PropertyFilter,
) -> Query<'q, Postgres, PgArguments> {
    q.bind(account_id)
        .bind(f.search.as_deref().map(like_pattern))
        .bind(f.property_type.map(|t| t.as_str()))
        .bind(f.status.map(|s| s.as_str()))
        .bind(f.city.as_deref().map(like_pattern))
        .bind(f.country.as_deref())
        .bind(f.is_mortgaged)
        .bind(f.investment_company_id)
        .bind(f.min_value)
        .bind(f.max_value)
        .bind(f.min_area)
        .bind(f.max_area)
}

fn property_from_row(r: &PgRow) -> anyhow::Result<Property> {
    Ok(Property {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: PropertyFields {
            address: r.get("address"),
            file_number: r.get("file_number"),
            property_type: opt_text_col(r, "property_type")?,
            status: opt_text_col(r, "status")?,
            country: r.get("country"),
            city: r.get("city"),
            total_area: r.get("total_area"),
            land_area: r.get("land_area"),
            estimated_value: r.get("estimated_value"),
            last_valuation_date: r.get("last_valuation_date"),
            investment_company_id: r.get("investment_company_id"),
            is_mortgaged: r.get("is_mortgaged"),
            acquisition_price: r.get("acquisition_price"),
            acquisition_date: r.get("acquisition_date"),
            is_sold: r.get("is_sold"),
            sale_date: r.get("sale_date"),
            sale_price: r.get("sale_price"),
            is_partial_ownership: r.get("is_partial_ownership"),
            shared_ownership_percentage: r.get("shared_ownership_percentage"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl PropertyRepository for SqlxPropertyRepository {
    async fn list(
        &self,
        account_id: Uuid,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<PropertyListItem>, i64)> {
        let sql = format!(
            "SELECT p.*,
                    (SELECT COUNT(*) FROM units u WHERE u.property_id = p.id)::BIGINT AS unit_count
             FROM properties p
             WHERE {FILTER}
             ORDER BY p.created_at DESC
             LIMIT $13 OFFSET $14"
        );
        let rows = bind_filter(sqlx::query(&sql), account_id, filter)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        let items = rows
            .iter()
            .map(|r| {
                Ok(PropertyListItem {
                    property: property_from_row(r)?,
                    unit_count: r.get("unit_count"),
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let count_sql = format!("SELECT COUNT(*)::BIGINT FROM properties p WHERE {FILTER}");
        let total: i64 = bind_filter(sqlx::query(&count_sql), account_id, filter)
            .fetch_one(&self.pool)
            .await?
            .get(0);
        Ok((items, total))
    }

    async fn list_all(&self, account_id: Uuid) -> anyhow::Result<Vec<Property>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM properties WHERE account_id = $1 ORDER BY address ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(property_from_row).collect()
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Property>> {
        let sql = format!("SELECT {COLUMNS} FROM properties WHERE id = $1 AND account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(property_from_row).transpose()
    }

    async fn find_by_address(
        &self,
        account_id: Uuid,
        address: &str,
    ) -> anyhow::Result<Option<Property>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE account_id = $1 AND lower(trim(address)) = lower(trim($2))
             ORDER BY created_at ASC
             LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(address)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(property_from_row).transpose()
    }

    async fn count_owned(&self, account_id: Uuid, ids: &[Uuid]) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM properties WHERE account_id = $1 AND id = ANY($2)",
        )
        .bind(account_id)
        .bind(ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }

    async fn count_units(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM units WHERE account_id = $1 AND property_id = $2",
        )
        .bind(account_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }

    async fn insert(&self, account_id: Uuid, f: &PropertyFields) -> anyhow::Result<Property> {
        let sql = format!(
            "INSERT INTO properties
               (account_id, address, file_number, property_type, status, country, city,
                total_area, land_area, estimated_value, last_valuation_date,
                investment_company_id, is_mortgaged, acquisition_price, acquisition_date,
                is_sold, sale_date, sale_price, is_partial_ownership,
                shared_ownership_percentage, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                     $16, $17, $18, $19, $20, $21)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(&f.address)
            .bind(&f.file_number)
            .bind(f.property_type.map(|t| t.as_str()))
            .bind(f.status.map(|s| s.as_str()))
            .bind(&f.country)
            .bind(&f.city)
            .bind(f.total_area)
            .bind(f.land_area)
            .bind(f.estimated_value)
            .bind(f.last_valuation_date)
            .bind(f.investment_company_id)
            .bind(f.is_mortgaged)
            .bind(f.acquisition_price)
            .bind(f.acquisition_date)
            .bind(f.is_sold)
            .bind(f.sale_date)
            .bind(f.sale_price)
            .bind(f.is_partial_ownership)
            .bind(f.shared_ownership_percentage)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        property_from_row(&row)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &PropertyFields,
    ) -> anyhow::Result<Option<Property>> {
        let sql = format!(
            "UPDATE properties SET
               address = $3, file_number = $4, property_type = $5, status = $6, country = $7,
               city = $8, total_area = $9, land_area = $10, estimated_value = $11,
               last_valuation_date = $12, investment_company_id = $13, is_mortgaged = $14,
               acquisition_price = $15, acquisition_date = $16, is_sold = $17, sale_date = $18,
               sale_price = $19, is_partial_ownership = $20,
               shared_ownership_percentage = $21, notes = $22, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(&f.address)
            .bind(&f.file_number)
            .bind(f.property_type.map(|t| t.as_str()))
            .bind(f.status.map(|s| s.as_str()))
            .bind(&f.country)
            .bind(&f.city)
            .bind(f.total_area)
            .bind(f.land_area)
            .bind(f.estimated_value)
            .bind(f.last_valuation_date)
            .bind(f.investment_company_id)
            .bind(f.is_mortgaged)
            .bind(f.acquisition_price)
            .bind(f.acquisition_date)
            .bind(f.is_sold)
            .bind(f.sale_date)
            .bind(f.sale_price)
            .bind(f.is_partial_ownership)
            .bind(f.shared_ownership_percentage)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(property_from_row).transpose()
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM properties WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn set_valuation(
        &self,
        account_id: Uuid,
        id: Uuid,
        value: Decimal,
        date: NaiveDate,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"UPDATE properties
               SET estimated_value = $3, last_valuation_date = $4, updated_at = now()
               WHERE id = $1 AND account_id = $2"#,
        )
        .bind(id)
        .bind(account_id)
        .bind(value)
        .bind(date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn occupancy_counts(&self, account_id: Uuid) -> anyhow::Result<OccupancyCounts> {
        let row = sqlx::query(
            r#"SELECT
                 (SELECT COUNT(*) FROM properties WHERE account_id = $1)::BIGINT AS total_properties,
                 (SELECT COUNT(*) FROM units WHERE account_id = $1)::BIGINT AS total_units,
                 (SELECT COUNT(DISTINCT unit_id) FROM leases
                    WHERE account_id = $1 AND status = 'ACTIVE')::BIGINT AS occupied_units,
                 (SELECT COUNT(*) FROM leases
                    WHERE account_id = $1 AND status = 'ACTIVE')::BIGINT AS active_leases"#,
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(OccupancyCounts {
            total_properties: row.get("total_properties"),
            total_units: row.get("total_units"),
            occupied_units: row.get("occupied_units"),
            active_leases: row.get("active_leases"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_trims_and_wraps() {
        assert_eq!(like_pattern("  Herzl "), "%Herzl%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }
}
