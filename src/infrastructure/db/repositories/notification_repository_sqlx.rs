use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::dto::notifications::{NotificationFilter, NotificationRecord};
use crate::application::dto::pagination::PageRequest;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::notifications::{Notification, NotificationStatus, NotificationType};
use crate::infrastructure::db::{PgPool, text_col};

const COLUMNS: &str = "id, account_id, lease_id, notification_type, days_before_expiration, \
                       status, sent_at, error, created_at";

const JOINED: &str = "SELECT n.*, t.name AS tenant_name, t.email AS tenant_email,
                             p.address AS property_address, u.apartment_number,
                             l.end_date AS lease_end_date
                      FROM notifications n
                      JOIN leases l ON l.id = n.lease_id
                      JOIN tenants t ON t.id = l.tenant_id
                      JOIN units u ON u.id = l.unit_id
                      JOIN properties p ON p.id = u.property_id";

const FILTER: &str = "n.account_id = $1
    AND ($2::text IS NULL OR n.status = $2)
    AND ($3::text IS NULL OR n.notification_type = $3)
    AND ($4::uuid IS NULL OR n.lease_id = $4)";

pub struct SqlxNotificationRepository {
    pub pool: PgPool,
}

impl SqlxNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn notification_from_row(r: &PgRow) -> anyhow::Result<Notification> {
    Ok(Notification {
        id: r.get("id"),
        account_id: r.get("account_id"),
        lease_id: r.get("lease_id"),
        notification_type: text_col(r, "notification_type")?,
        days_before_expiration: r.get("days_before_expiration"),
        status: text_col(r, "status")?,
        sent_at: r.get("sent_at"),
        error: r.get("error"),
        created_at: r.get("created_at"),
    })
}

fn record_from_row(r: &PgRow) -> anyhow::Result<NotificationRecord> {
    Ok(NotificationRecord {
        notification: notification_from_row(r)?,
        tenant_name: r.get("tenant_name"),
        tenant_email: r.get("tenant_email"),
        property_address: r.get("property_address"),
        apartment_number: r.get("apartment_number"),
        lease_end_date: r.get("lease_end_date"),
    })
}

#[async_trait]
impl NotificationRepository for SqlxNotificationRepository {
    async fn list(
        &self,
        account_id: Uuid,
        f: &NotificationFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<NotificationRecord>, i64)> {
        let status = f.status.map(|s| s.as_str());
        let kind = f.notification_type.map(|t| t.as_str());
        let sql = format!("{JOINED} WHERE {FILTER} ORDER BY n.created_at DESC LIMIT $5 OFFSET $6");
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(status)
            .bind(kind)
            .bind(f.lease_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;
        let count_sql = format!("SELECT COUNT(*)::BIGINT FROM notifications n WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(account_id)
            .bind(status)
            .bind(kind)
            .bind(f.lease_id)
            .fetch_one(&self.pool)
            .await?;
        let items = rows.iter().map(record_from_row).collect::<anyhow::Result<Vec<_>>>()?;
        Ok((items, total))
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<NotificationRecord>> {
        let sql = format!("{JOINED} WHERE n.id = $1 AND n.account_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn exists_for(&self, lease_id: Uuid, days_before_expiration: i32) -> anyhow::Result<bool> {
        let found: bool = sqlx::query_scalar(
            r#"SELECT EXISTS(
                 SELECT 1 FROM notifications WHERE lease_id = $1 AND days_before_expiration = $2
               )"#,
        )
        .bind(lease_id)
        .bind(days_before_expiration)
        .fetch_one(&self.pool)
        .await?;
        Ok(found)
    }

    async fn insert(
        &self,
        account_id: Uuid,
        lease_id: Uuid,
        notification_type: NotificationType,
        days_before_expiration: i32,
    ) -> anyhow::Result<Notification> {
        let sql = format!(
            "INSERT INTO notifications (account_id, lease_id, notification_type, days_before_expiration)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(account_id)
            .bind(lease_id)
            .bind(notification_type.as_str())
            .bind(days_before_expiration)
            .fetch_one(&self.pool)
            .await?;
        notification_from_row(&row)
    }

    async fn list_by_status(
        &self,
        account_id: Uuid,
        status: NotificationStatus,
    ) -> anyhow::Result<Vec<NotificationRecord>> {
        let sql = format!(
            "{JOINED} WHERE n.account_id = $1 AND n.status = $2 ORDER BY l.end_date ASC, n.created_at ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(account_id)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn mark_sent(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("UPDATE notifications SET status = 'SENT', sent_at = now(), error = NULL WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE notifications SET status = 'FAILED', error = $2 WHERE id = $1")
            .bind(id)
            .bind(error)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn reset_failed(&self, account_id: Uuid, ids: &[Uuid]) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"UPDATE notifications SET status = 'PENDING', error = NULL
               WHERE account_id = $1 AND id = ANY($2) AND status = 'FAILED'"#,
        )
        .bind(account_id)
        .bind(ids)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    async fn get_settings(&self, account_id: Uuid) -> anyhow::Result<Option<Vec<i32>>> {
        let days = sqlx::query_scalar(
            "SELECT days_before_expiration FROM notification_settings WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(days)
    }

    async fn upsert_settings(&self, account_id: Uuid, days: &[i32]) -> anyhow::Result<()> {
        sqlx::query(
            r#"INSERT INTO notification_settings (account_id, days_before_expiration)
               VALUES ($1, $2)
               ON CONFLICT (account_id)
               DO UPDATE SET days_before_expiration = EXCLUDED.days_before_expiration,
                             updated_at = now()"#,
        )
        .bind(account_id)
        .bind(days)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
