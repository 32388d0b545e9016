use chrono::{Months, NaiveDate};
use uuid::Uuid;

use crate::application::dto::leases::{ExpiringLease, RefreshResult};
use crate::application::errors::{ServiceError, ServiceResult};
use crate::application::ports::lease_repository::LeaseRepository;

pub const DEFAULT_TIMELINE_MONTHS: u32 = 12;
const MAX_TIMELINE_MONTHS: u32 = 120;

/// Re-derives every non-terminated lease status from today's date.
pub struct RefreshLeaseStatuses<'a, R: LeaseRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaseRepository + ?Sized> RefreshLeaseStatuses<'a, R> {
    pub async fn execute(&self, account_id: Uuid, today: NaiveDate) -> ServiceResult<RefreshResult> {
        let leases = self.repo.list_refreshable(account_id).await?;
        let mut updated = 0;
        for lease in leases {
            let next = lease
                .status
                .refreshed(lease.fields.start_date, lease.fields.end_date, today);
            if next != lease.status && self.repo.set_status(account_id, lease.id, next).await? {
                updated += 1;
            }
        }
        if updated > 0 {
            tracing::info!(%account_id, updated, "lease_statuses_refreshed");
        }
        Ok(RefreshResult { updated })
    }
}

pub struct GetExpirationTimeline<'a, R: LeaseRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: LeaseRepository + ?Sized> GetExpirationTimeline<'a, R> {
    pub async fn execute(
        &self,
        account_id: Uuid,
        months: Option<u32>,
        today: NaiveDate,
    ) -> ServiceResult<Vec<ExpiringLease>> {
        let months = months.unwrap_or(DEFAULT_TIMELINE_MONTHS);
        if months == 0 || months > MAX_TIMELINE_MONTHS {
            return Err(ServiceError::bad_request(format!(
                "months must be between 1 and {MAX_TIMELINE_MONTHS}"
            )));
        }
        let until = today
            .checked_add_months(Months::new(months))
            .ok_or_else(|| ServiceError::bad_request("months is out of range"))?;
        let records = self.repo.list_expiring(account_id, until).await?;
        Ok(records
            .into_iter()
            .map(|record| ExpiringLease {
                days_until_expiration: (record.lease.fields.end_date - today).num_days(),
                record,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::leases::test_support::{MemLeases, d};
    use crate::domain::leases::LeaseStatus;

    #[tokio::test]
    async fn refresh_moves_leases_along_the_calendar_but_keeps_terminations() {
        let repo = MemLeases::default();
        let account = Uuid::new_v4();
        let unit = Uuid::new_v4();
        let starting = repo.seed(account, unit, "2024-03-01", "2025-02-28", LeaseStatus::Future);
        let ending = repo.seed(account, Uuid::new_v4(), "2023-01-01", "2024-02-29", LeaseStatus::Active);
        let terminated = repo.seed(account, Uuid::new_v4(), "2023-01-01", "2024-02-29", LeaseStatus::Terminated);

        let result = RefreshLeaseStatuses { repo: &repo }
            .execute(account, d("2024-03-01"))
            .await
            .unwrap();

        assert_eq!(result.updated, 2);
        assert_eq!(repo.status_of(starting), LeaseStatus::Active);
        assert_eq!(repo.status_of(ending), LeaseStatus::Ended);
        assert_eq!(repo.status_of(terminated), LeaseStatus::Terminated);
    }

    #[tokio::test]
    async fn timeline_reports_days_left_within_the_window() {
        let repo = MemLeases::default();
        let account = Uuid::new_v4();
        repo.seed(account, Uuid::new_v4(), "2024-01-01", "2024-01-31", LeaseStatus::Active);
        repo.seed(account, Uuid::new_v4(), "2024-01-01", "2024-12-31", LeaseStatus::Active);
        repo.seed(account, Uuid::new_v4(), "2024-01-01", "2026-12-31", LeaseStatus::Active);

        let timeline = GetExpirationTimeline { repo: &repo }
            .execute(account, Some(6), d("2024-01-01"))
            .await
            .unwrap();

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].days_until_expiration, 30);
    }

    #[tokio::test]
    async fn timeline_rejects_a_zero_month_window() {
        let repo = MemLeases::default();
        let err = GetExpirationTimeline { repo: &repo }
            .execute(Uuid::new_v4(), Some(0), d("2024-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest(_)));
    }
}
