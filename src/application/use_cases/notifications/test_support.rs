use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::application::dto::notifications::{NotificationFilter, NotificationRecord};
use crate::application::dto::pagination::PageRequest;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::ports::notification_sender::NotificationSender;
use crate::domain::notifications::{Notification, NotificationStatus, NotificationType};

#[derive(Default)]
pub struct MemNotifications {
    pub rows: Mutex<Vec<Notification>>,
    pub settings: Mutex<Option<Vec<i32>>>,
}

impl MemNotifications {
    pub fn seed(&self, account_id: Uuid, status: NotificationStatus) -> Uuid {
        let n = Notification {
            id: Uuid::new_v4(),
            account_id,
            lease_id: Uuid::new_v4(),
            notification_type: NotificationType::LeaseExpiring,
            days_before_expiration: 30,
            status,
            sent_at: None,
            error: None,
            created_at: Utc::now(),
        };
        let id = n.id;
        self.rows.lock().unwrap().push(n);
        id
    }

    pub fn status_of(&self, id: Uuid) -> NotificationStatus {
        self.rows.lock().unwrap().iter().find(|n| n.id == id).unwrap().status
    }

    fn record(notification: Notification) -> NotificationRecord {
        NotificationRecord {
            notification,
            tenant_name: "Dana Levi".into(),
            tenant_email: Some("dana@example.com".into()),
            property_address: "הרצל 1".into(),
            apartment_number: "3".into(),
            lease_end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        }
    }

    fn update(&self, id: Uuid, f: impl FnOnce(&mut Notification)) {
        if let Some(n) = self.rows.lock().unwrap().iter_mut().find(|n| n.id == id) {
            f(n);
        }
    }
}

#[async_trait]
impl NotificationRepository for MemNotifications {
    async fn list(
        &self,
        account_id: Uuid,
        filter: &NotificationFilter,
        _page: PageRequest,
    ) -> anyhow::Result<(Vec<NotificationRecord>, i64)> {
        let rows: Vec<NotificationRecord> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.account_id == account_id)
            .filter(|n| filter.status.is_none_or(|s| n.status == s))
            .cloned()
            .map(Self::record)
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn get(&self, account_id: Uuid, id: Uuid) -> anyhow::Result<Option<NotificationRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.account_id == account_id && n.id == id)
            .cloned()
            .map(Self::record))
    }

    async fn exists_for(&self, lease_id: Uuid, days: i32) -> anyhow::Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|n| n.lease_id == lease_id && n.days_before_expiration == days))
    }

    async fn insert(
        &self,
        account_id: Uuid,
        lease_id: Uuid,
        notification_type: NotificationType,
        days_before_expiration: i32,
    ) -> anyhow::Result<Notification> {
        let n = Notification {
            id: Uuid::new_v4(),
            account_id,
            lease_id,
            notification_type,
            days_before_expiration,
            status: NotificationStatus::Pending,
            sent_at: None,
            error: None,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(n.clone());
        Ok(n)
    }

    async fn list_by_status(
        &self,
        account_id: Uuid,
        status: NotificationStatus,
    ) -> anyhow::Result<Vec<NotificationRecord>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.account_id == account_id && n.status == status)
            .cloned()
            .map(Self::record)
            .collect())
    }

    async fn mark_sent(&self, id: Uuid) -> anyhow::Result<()> {
        self.update(id, |n| {
            n.status = NotificationStatus::Sent;
            n.sent_at = Some(Utc::now());
            n.error = None;
        });
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid, error: &str) -> anyhow::Result<()> {
        self.update(id, |n| {
            n.status = NotificationStatus::Failed;
            n.error = Some(error.to_string());
        });
        Ok(())
    }

    async fn reset_failed(&self, account_id: Uuid, ids: &[Uuid]) -> anyhow::Result<u64> {
        let mut moved = 0;
        for n in self.rows.lock().unwrap().iter_mut() {
            if n.account_id == account_id && ids.contains(&n.id) && n.status == NotificationStatus::Failed {
                n.status = NotificationStatus::Pending;
                n.error = None;
                moved += 1;
            }
        }
        Ok(moved)
    }

    async fn get_settings(&self, _account_id: Uuid) -> anyhow::Result<Option<Vec<i32>>> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn upsert_settings(&self, _account_id: Uuid, days: &[i32]) -> anyhow::Result<()> {
        *self.settings.lock().unwrap() = Some(days.to_vec());
        Ok(())
    }
}

/// Fails every delivery while `down` is set.
#[derive(Default)]
pub struct FlakySender {
    pub down: Mutex<bool>,
}

#[async_trait]
impl NotificationSender for FlakySender {
    async fn send(&self, _notification: &NotificationRecord) -> anyhow::Result<()> {
        if *self.down.lock().unwrap() {
            anyhow::bail!("smtp unavailable");
        }
        Ok(())
    }
}
