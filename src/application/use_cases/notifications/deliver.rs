use std::collections::HashSet;

use uuid::Uuid;

use crate::application::dto::notifications::{BulkRetryResult, NotificationRecord, ProcessResult};
use crate::application::errors::{OrNotFound, ServiceError, ServiceResult};
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::notification_sender::NotificationSender;
use crate::domain::notifications::NotificationStatus;

const ENTITY: &str = "Notification";

/// Sends every PENDING notification of the account. Each one ends SENT or FAILED.
pub struct ProcessNotifications<'a, R, S>
where
    R: NotificationRepository + ?Sized,
    S: NotificationSender + ?Sized,
{
    pub repo: &'a R,
    pub sender: &'a S,
}

impl<'a, R, S> ProcessNotifications<'a, R, S>
where
    R: NotificationRepository + ?Sized,
    S: NotificationSender + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid) -> ServiceResult<ProcessResult> {
        let pending = self
            .repo
            .list_by_status(account_id, NotificationStatus::Pending)
            .await?;
        let mut result = ProcessResult::default();
        for record in pending {
            result.processed += 1;
            let id = record.notification.id;
            match self.sender.send(&record).await {
                Ok(()) => {
                    self.repo.mark_sent(id).await?;
                    result.sent += 1;
                }
                Err(e) => {
                    tracing::warn!(notification_id = %id, error = ?e, "notification_send_failed");
                    self.repo.mark_failed(id, &e.to_string()).await?;
                    result.failed += 1;
                }
            }
        }
        Ok(result)
    }
}

pub struct RetryNotification<'a, R, S>
where
    R: NotificationRepository + ?Sized,
    S: NotificationSender + ?Sized,
{
    pub repo: &'a R,
    pub sender: &'a S,
}

impl<'a, R, S> RetryNotification<'a, R, S>
where
    R: NotificationRepository + ?Sized,
    S: NotificationSender + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<NotificationRecord> {
        let record = self.repo.get(account_id, id).await?.or_not_found(ENTITY)?;
        if record.notification.status != NotificationStatus::Failed {
            return Err(ServiceError::bad_request(
                "Only failed notifications can be retried",
            ));
        }
        self.repo.reset_failed(account_id, &[id]).await?;
        ProcessNotifications {
            repo: self.repo,
            sender: self.sender,
        }
        .execute(account_id)
        .await?;
        self.repo.get(account_id, id).await?.or_not_found(ENTITY)
    }
}

pub struct RetryNotifications<'a, R, S>
where
    R: NotificationRepository + ?Sized,
    S: NotificationSender + ?Sized,
{
    pub repo: &'a R,
    pub sender: &'a S,
}

impl<'a, R, S> RetryNotifications<'a, R, S>
where
    R: NotificationRepository + ?Sized,
    S: NotificationSender + ?Sized,
{
    pub async fn execute(&self, account_id: Uuid, ids: &[Uuid]) -> ServiceResult<BulkRetryResult> {
        let ids: Vec<Uuid> = ids
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Err(ServiceError::bad_request("ids must not be empty"));
        }
        for id in &ids {
            let record = self.repo.get(account_id, *id).await?;
            match record {
                Some(r) if r.notification.status == NotificationStatus::Failed => {}
                Some(_) => {
                    return Err(ServiceError::bad_request(format!(
                        "Notification {id} is not in FAILED status"
                    )));
                }
                None => {
                    return Err(ServiceError::bad_request(format!(
                        "Notification {id} not found"
                    )));
                }
            }
        }
        let retried = self.repo.reset_failed(account_id, &ids).await? as usize;
        let result = ProcessNotifications {
            repo: self.repo,
            sender: self.sender,
        }
        .execute(account_id)
        .await?;
        Ok(BulkRetryResult { retried, result })
    }
}
