use async_trait::async_trait;
use uuid::Uuid;

use crate::application::dto::notifications::{NotificationFilter, NotificationRecord};
use crate::application::dto::pagination::PageRequest;
use crate::domain::notifications::{Notification, NotificationStatus, NotificationType};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list(
        &self,
        account_id: Uuid,
        filter: &NotificationFilter,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<NotificationRecord>, i64)>;
    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<NotificationRecord>>;
    async fn exists_for(&self, lease_id: Uuid, days_before_expiration: i32) -> anyhow::Result<bool>;
    async fn insert(
        &self,
        account_id: Uuid,
        lease_id: Uuid,
        notification_type: NotificationType,
        days_before_expiration: i32,
    ) -> anyhow::Result<Notification>;
    async fn list_by_status(
        &self,
        account_id: Uuid,
        status: NotificationStatus,
    ) -> anyhow::Result<Vec<NotificationRecord>>;
    async fn mark_sent(&self, id: Uuid) -> anyhow::Result<()>;
    async fn mark_failed(&self, id: Uuid, error: &str) -> anyhow::Result<()>;
    /// Moves the given FAILED notifications back to PENDING; returns how many moved.
    async fn reset_failed(&self, account_id: Uuid, ids: &[Uuid]) -> anyhow::Result<u64>;

    async fn get_settings(&self, account_id: Uuid) -> anyhow::Result<Option<Vec<i32>>>;
    async fn upsert_settings(&self, account_id: Uuid, days: &[i32]) -> anyhow::Result<()>;
}
