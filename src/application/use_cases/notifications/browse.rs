use uuid::Uuid;

use crate::application::dto::notifications::{NotificationFilter, NotificationRecord};
use crate::application::dto::pagination::{Page, PageRequest};
use crate::application::errors::{OrNotFound, ServiceResult};
use crate::application::ports::notification_repository::NotificationRepository;
use crate::domain::notifications::NotificationStatus;

pub struct ListNotifications<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> ListNotifications<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        filter: &NotificationFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<NotificationRecord>> {
        let (rows, total) = self.repo.list(account_id, filter, page).await?;
        Ok(Page::new(rows, total, page))
    }
}

/// First page of reminders still waiting to be sent.
pub struct ListUpcomingNotifications<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> ListUpcomingNotifications<'a, R> {
    pub async fn execute(&self, account_id: Uuid) -> ServiceResult<Page<NotificationRecord>> {
        let filter = NotificationFilter {
            status: Some(NotificationStatus::Pending),
            ..NotificationFilter::default()
        };
        ListNotifications { repo: self.repo }
            .execute(account_id, &filter, PageRequest::default())
            .await
    }
}

pub struct GetNotification<'a, R: NotificationRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: NotificationRepository + ?Sized> GetNotification<'a, R> {
    pub async fn execute(&self, account_id: Uuid, id: Uuid) -> ServiceResult<NotificationRecord> {
        self.repo.get(account_id, id).await?.or_not_found("Notification")
    }
}
