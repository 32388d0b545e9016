use uuid::Uuid;

use crate::application::dto::notifications::NotificationSettings;
use crate::application::errors::ServiceResult;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::notifications::normalize_reminder_days;

/// Stored offsets of the account, or the configured defaults.
pub(crate) async fn effective_days<R: NotificationRepository + ?Sized>(
    repo: &R,
    account_id: Uuid,
    default_days: &[i32],
) -> anyhow::Result<Vec<i32>> {
    Ok(repo
        .get_settings(account_id)
        .await?
        .unwrap_or_else(|| default_days.to_vec()))
}

pub struct GetNotificationSettings<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> GetNotificationSettings<'a, R> {
    pub async fn execute(&self, account_id: Uuid, default_days: &[i32]) -> ServiceResult<NotificationSettings> {
        Ok(NotificationSettings {
            days_before_expiration: effective_days(self.repo, account_id, default_days).await?,
        })
    }
}

pub struct UpdateNotificationSettings<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> UpdateNotificationSettings<'a, R> {
    pub async fn execute(&self, account_id: Uuid, days: &[i32]) -> ServiceResult<NotificationSettings> {
        let days = normalize_reminder_days(days)?;
        self.repo.upsert_settings(account_id, &days).await?;
        Ok(NotificationSettings {
            days_before_expiration: days,
        })
    }
}
