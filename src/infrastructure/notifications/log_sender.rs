use async_trait::async_trait;

use crate::application::dto::notifications::NotificationRecord;
use crate::application::ports::notification_sender::NotificationSender;

/// Delivery channel that only records the message in the service log.
#[derive(Debug, Clone, Default)]
pub struct LogNotificationSender;

#[async_trait]
impl NotificationSender for LogNotificationSender {
    async fn send(&self, n: &NotificationRecord) -> anyhow::Result<()> {
        tracing::info!(
            notification_id = %n.notification.id,
            lease_id = %n.notification.lease_id,
            kind = %n.notification.notification_type,
            days = n.notification.days_before_expiration,
            tenant = %n.tenant_name,
            email = n.tenant_email.as_deref().unwrap_or("-"),
            property = %n.property_address,
            apartment = %n.apartment_number,
            lease_end = %n.lease_end_date,
            "notification_delivered"
        );
        Ok(())
    }
}
