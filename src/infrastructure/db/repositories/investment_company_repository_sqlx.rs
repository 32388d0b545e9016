use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::investment_company_repository::InvestmentCompanyRepository;
use crate::domain::investment_companies::{InvestmentCompany, InvestmentCompanyFields};
use crate::infrastructure::db::PgPool;

const COLUMNS: &str = "id, account_id, name, registration_number, country, investment_amount, \
                       ownership_percentage, notes, created_at, updated_at";

pub struct SqlxInvestmentCompanyRepository {
    pub pool: PgPool,
}

impl SqlxInvestmentCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn company_from_row(r: &PgRow) -> InvestmentCompany {
    InvestmentCompany {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: InvestmentCompanyFields {
            name: r.get("name"),
            registration_number: r.get("registration_number"),
            country: r.get("country"),
            investment_amount: r.get("investment_amount"),
            ownership_percentage: r.get("ownership_percentage"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    }
}

#[async_trait]
impl InvestmentCompanyRepository for SqlxInvestmentCompanyRepository {
    async fn list(&self, account_id: Uuid) -> anyhow::Result<Vec<(InvestmentCompany, i64)>> {
        let rows = sqlx::query(
            r#"SELECT c.*,
                      (SELECT COUNT(*) FROM properties p
                         WHERE p.investment_company_id = c.id)::BIGINT AS property_count
               FROM investment_companies c
               WHERE c.account_id = $1
               ORDER BY c.name ASC"#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| (company_from_row(r), r.get("property_count")))
            .collect())
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<InvestmentCompany>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM investment_companies WHERE id = $1 AND account_id = $2"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(company_from_row))
    }

    async fn find_by_name(
        &self,
        account_id: Uuid,
        name: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar(
            r#"SELECT id FROM investment_companies
               WHERE account_id = $1 AND lower(trim(name)) = lower(trim($2))
                 AND ($3::uuid IS NULL OR id <> $3)
               LIMIT 1"#,
        )
        .bind(account_id)
        .bind(name)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert(
        &self,
        account_id: Uuid,
        f: &InvestmentCompanyFields,
    ) -> anyhow::Result<InvestmentCompany> {
        let sql = format!(
            "INSERT INTO investment_companies
               (account_id, name, registration_number, country, investment_amount,
                ownership_percentage, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(&f.name)
            .bind(&f.registration_number)
            .bind(&f.country)
            .bind(f.investment_amount)
            .bind(f.ownership_percentage)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(company_from_row(&row))
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &InvestmentCompanyFields,
    ) -> anyhow::Result<Option<InvestmentCompany>> {
        let sql = format!(
            "UPDATE investment_companies SET
               name = $3, registration_number = $4, country = $5, investment_amount = $6,
               ownership_percentage = $7, notes = $8, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(&f.name)
            .bind(&f.registration_number)
            .bind(&f.country)
            .bind(f.investment_amount)
            .bind(f.ownership_percentage)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(company_from_row))
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM investment_companies WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn count_properties(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM properties WHERE account_id = $1 AND investment_company_id = $2",
        )
        .bind(account_id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }
}
