use async_trait::async_trait;

use crate::application::dto::notifications::NotificationRecord;

/// Delivers one notification to its recipient.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, notification: &NotificationRecord) -> anyhow::Result<()>;
}
