use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::mortgages::MortgageFilter;
use crate::application::dto::pagination::PageRequest;
use crate::application::ports::mortgage_repository::MortgageRepository;
use crate::domain::mortgages::{Mortgage, MortgageFields, MortgagePayment, PaymentFields};
use crate::infrastructure::db::repositories::property_repository_sqlx::like_pattern;
use crate::infrastructure::db::{PgPool, text_col};

const COLUMNS: &str = "id, account_id, property_id, bank, loan_amount, interest_rate, \
                       monthly_payment, start_date, end_date, status, bank_account_id, \
                       linked_properties, notes, created_at, updated_at";

const PAYMENT_COLUMNS: &str =
    "id, account_id, mortgage_id, payment_date, amount, principal, interest, notes, created_at";

const FILTER: &str = "account_id = $1
    AND ($2::uuid IS NULL OR property_id = $2)
    AND ($3::text IS NULL OR status = $3)
    AND ($4::text IS NULL OR bank ILIKE $4 ESCAPE '\\')
    AND ($5::uuid IS NULL OR bank_account_id = $5)";

pub struct SqlxMortgageRepository {
    pub pool: PgPool,
}

impl SqlxMortgageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn mortgage_from_row(r: &PgRow) -> anyhow::Result<Mortgage> {
    Ok(Mortgage {
        id: r.get("id"),
        account_id: r.get("account_id"),
        fields: MortgageFields {
            property_id: r.get("property_id"),
            bank: r.get("bank"),
            loan_amount: r.get("loan_amount"),
            interest_rate: r.get("interest_rate"),
            monthly_payment: r.get("monthly_payment"),
            start_date: r.get("start_date"),
            end_date: r.get("end_date"),
            status: text_col(r, "status")?,
            bank_account_id: r.get("bank_account_id"),
            linked_properties: r.get("linked_properties"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

fn payment_from_row(r: &PgRow) -> MortgagePayment {
    MortgagePayment {
        id: r.get("id"),
        account_id: r.get("account_id"),
        mortgage_id: r.get("mortgage_id"),
        fields: PaymentFields {
            payment_date: r.get("payment_date"),
            amount: r.get("amount"),
            principal: r.get("principal"),
            interest: r.get("interest"),
            notes: r.get("notes"),
        },
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl MortgageRepository for SqlxMortgageRepository {
    async fn list(
        &self,
        account_id: Uuid,
        f: &MortgageFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<Mortgage>, i64)> {
        let bank = f.bank.as_deref().map(like_pattern);
        let status = f.status.map(|s| s.as_str());
        let sql = format!(
            "SELECT {COLUMNS} FROM mortgages WHERE {FILTER}
             ORDER BY start_date DESC, created_at DESC
             LIMIT $6 OFFSET $7"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(status)
            .bind(&bank)
            .bind(f.bank_account_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        let count_sql = format!("SELECT COUNT(*)::BIGINT FROM mortgages WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(status)
            .bind(&bank)
            .bind(f.bank_account_id)
            .fetch_one(&self.pool)
            .await?;
        let items = rows.iter().map(mortgage_from_row).collect::<anyhow::Result<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn list_with_principal_paid(
        &self,
        account_id: Uuid,
    ) -> anyhow::Result<Vec<(Mortgage, Decimal)>> {
        let rows = sqlx::query(
            r#"SELECT m.*,
                      COALESCE((SELECT SUM(mp.principal) FROM mortgage_payments mp
                                WHERE mp.mortgage_id = m.id), 0) AS principal_paid
               FROM mortgages m
               WHERE m.account_id = $1
               ORDER BY m.start_date DESC"#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|r| Ok((mortgage_from_row(r)?, r.get("principal_paid"))))
            .collect()
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<Mortgage>> {
        let sql = format!("SELECT {COLUMNS} FROM mortgages WHERE id = $1 AND account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(mortgage_from_row).transpose()
    }

    async fn insert(&self, account_id: Uuid, f: &MortgageFields) -> anyhow::Result<Mortgage> {
        let sql = format!(
            "INSERT INTO mortgages
               (account_id, property_id, bank, loan_amount, interest_rate, monthly_payment,
                start_date, end_date, status, bank_account_id, linked_properties, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(f.property_id)
            .bind(&f.bank)
            .bind(f.loan_amount)
            .bind(f.interest_rate)
            .bind(f.monthly_payment)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(f.status.as_str())
            .bind(f.bank_account_id)
            .bind(&f.linked_properties)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        mortgage_from_row(&row)
    }

    async fn update(
        &self,
        account_id: Uuid,
        id: Uuid,
        f: &MortgageFields,
    ) -> anyhow::Result<Option<Mortgage>> {
        let sql = format!(
            "UPDATE mortgages SET
               property_id = $3, bank = $4, loan_amount = $5, interest_rate = $6,
               monthly_payment = $7, start_date = $8, end_date = $9, status = $10,
               bank_account_id = $11, linked_properties = $12, notes = $13, updated_at = now()
             WHERE id = $1 AND account_id = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .bind(f.property_id)
            .bind(&f.bank)
            .bind(f.loan_amount)
            .bind(f.interest_rate)
            .bind(f.monthly_payment)
            .bind(f.start_date)
            .bind(f.end_date)
            .bind(f.status.as_str())
            .bind(f.bank_account_id)
            .bind(&f.linked_properties)
            .bind(&f.notes)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(mortgage_from_row).transpose()
    }

    async fn delete(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM mortgages WHERE id = $1 AND account_id = $2")
            .bind(id)
            .bind(account_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_payments(
        &self,
        account_id: Uuid,
        mortgage_id: Uuid,
    ) -> anyhow::Result<Vec<MortgagePayment>> {
        let sql = format!(
            "SELECT {PAYMENT_COLUMNS} FROM mortgage_payments
             WHERE account_id = $1 AND mortgage_id = $2
             ORDER BY payment_date DESC, created_at DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(mortgage_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(payment_from_row).collect())
    }

    async fn count_payments(&self, account_id: Uuid, mortgage_id: Uuid) -> anyhow::Result<i64> {
        let n: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)::BIGINT FROM mortgage_payments WHERE account_id = $1 AND mortgage_id = $2",
        )
        .bind(account_id)
        .bind(mortgage_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(n)
    }

    async fn insert_payment(
        &self,
        account_id: Uuid,
        mortgage_id: Uuid,
        f: &PaymentFields,
    ) -> anyhow::Result<MortgagePayment> {
        let sql = format!(
            "INSERT INTO mortgage_payments
               (account_id, mortgage_id, payment_date, amount, principal, interest, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PAYMENT_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(mortgage_id)
            .bind(f.payment_date)
            .bind(f.amount)
            .bind(f.principal)
            .bind(f.interest)
            .bind(&f.notes)
            .fetch_one(&self.pool)
            .await?;
        Ok(payment_from_row(&row))
    }

    async fn delete_payment(
        &self,
        account_id: Uuid,
        mortgage_id: Uuid,
        payment_id: Uuid,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            "DELETE FROM mortgage_payments WHERE id = $1 AND mortgage_id = $2 AND account_id = $3",
        )
        .bind(payment_id)
        .bind(mortgage_id)
        .bind(account_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn payments_between(
        &self,
        account_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<(NaiveDate, Decimal)>> {
        let rows = sqlx::query(
            r#"SELECT payment_date, amount FROM mortgage_payments
               WHERE account_id = $1
                 AND ($2::date IS NULL OR payment_date >= $2)
                 AND ($3::date IS NULL OR payment_date <= $3)
               ORDER BY payment_date ASC"#,
        )
        .bind(account_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .iter()
            .map(|r| (r.get("payment_date"), r.get("amount")))
            .collect())
    }
}
