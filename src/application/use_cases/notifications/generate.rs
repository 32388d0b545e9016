use chrono::{Days, NaiveDate};
use uuid::Uuid;

use crate::application::dto::notifications::GenerateResult;
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::lease_repository::LeaseRepository;
use crate::application::ports::notification_repository::NotificationRepository;
use crate::application::use_cases::notifications::settings::effective_days;
use crate::domain::notifications::{NotificationType, normalize_reminder_days};

/// Creates one PENDING reminder per lease and offset for leases ending exactly
/// `d` days from today. Existing `(lease, d)` reminders are left alone.
pub struct GenerateNotifications<'a, R, L>
where
    R: NotificationRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub repo: &'a R,
    pub leases: &'a L,
}

impl<'a, R, L> GenerateNotifications<'a, R, L>
where
    R: NotificationRepository + ?Sized,
    L: LeaseRepository + ?Sized,
{
    pub async fn execute(
        &self,
        account_id: Uuid,
        days: Option<Vec<i32>>,
        default_days: &[i32],
        today: NaiveDate,
    ) -> ServiceResult<GenerateResult> {
        let days = match days {
            Some(days) => normalize_reminder_days(&days)?,
            None => effective_days(self.repo, account_id, default_days).await?,
        };

        let mut created = 0;
        for offset in days {
            let Ok(offset_u64) = u64::try_from(offset) else {
                continue;
            };
            let end_date = today
                .checked_add_days(Days::new(offset_u64))
                .ok_or_else(|| ServiceError::bad_request("days_before_expiration is out of range"))?;
            for lease in self.leases.list_ending_on(account_id, end_date).await? {
                if self.repo.exists_for(lease.id, offset).await? {
                    continue;
                }
                let kind = NotificationType::for_lease_end(lease.fields.end_date, today);
                self.repo.insert(account_id, lease.id, kind, offset).await?;
                created += 1;
            }
        }
        if created > 0 {
            tracing::info!(%account_id, created, "notifications_generated");
        }
        Ok(GenerateResult { created })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::leases::test_support::{MemLeases, d};
    use crate::application::use_cases::notifications::test_support::MemNotifications;
    use crate::domain::leases::LeaseStatus;

    #[tokio::test]
    async fn reminders_are_created_once_per_lease_and_offset() {
        let repo = MemNotifications::default();
        let leases = MemLeases::default();
        let account = Uuid::new_v4();
        leases.seed(account, Uuid::new_v4(), "2024-01-01", "2024-07-01", LeaseStatus::Active);
        leases.seed(account, Uuid::new_v4(), "2024-01-01", "2024-07-02", LeaseStatus::Active);
        leases.seed(account, Uuid::new_v4(), "2024-01-01", "2024-07-01", LeaseStatus::Terminated);
        let generate = GenerateNotifications { repo: &repo, leases: &leases };

        let first = generate
            .execute(account, None, &[30], d("2024-06-01"))
            .await
            .unwrap();
        assert_eq!(first.created, 1);

        let again = generate
            .execute(account, None, &[30], d("2024-06-01"))
            .await
            .unwrap();
        assert_eq!(again.created, 0);

        let rows = repo.rows.lock().unwrap();
        assert_eq!(rows[0].notification_type, NotificationType::LeaseExpiring);
        assert_eq!(rows[0].days_before_expiration, 30);
    }

    #[tokio::test]
    async fn stored_settings_override_the_default_offsets() {
        let repo = MemNotifications::default();
        *repo.settings.lock().unwrap() = Some(vec![7]);
        let leases = MemLeases::default();
        let account = Uuid::new_v4();
        leases.seed(account, Uuid::new_v4(), "2024-01-01", "2024-06-08", LeaseStatus::Active);

        let result = GenerateNotifications { repo: &repo, leases: &leases }
            .execute(account, None, &[30], d("2024-06-01"))
            .await
            .unwrap();
        assert_eq!(result.created, 1);
    }

    #[tokio::test]
    async fn explicit_offsets_are_validated() {
        let repo = MemNotifications::default();
        let leases = MemLeases::default();
        let err = GenerateNotifications { repo: &repo, leases: &leases }
            .execute(Uuid::new_v4(), Some(vec![0]), &[30], d("2024-06-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }
}
