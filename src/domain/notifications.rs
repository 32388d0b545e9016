use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::rules::{RuleViolation, ensure};

crate::text_enum!(NotificationType {
    LeaseExpiring => "LEASE_EXPIRING",
    LeaseExpired => "LEASE_EXPIRED",
});

crate::text_enum!(NotificationStatus {
    Pending => "PENDING",
    Sent => "SENT",
    Failed => "FAILED",
});

impl NotificationType {
    pub fn for_lease_end(end_date: NaiveDate, today: NaiveDate) -> Self {
        if today >= end_date {
            NotificationType::LeaseExpired
        } else {
            NotificationType::LeaseExpiring
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub account_id: Uuid,
    pub lease_id: Uuid,
    pub notification_type: NotificationType,
    pub days_before_expiration: i32,
    pub status: NotificationStatus,
    pub sent_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const MIN_REMINDER_DAYS: i32 = 1;
pub const MAX_REMINDER_DAYS: i32 = 365;

/// Validates reminder offsets and returns them sorted without duplicates.
pub fn normalize_reminder_days(days: &[i32]) -> Result<Vec<i32>, RuleViolation> {
    ensure(
        !days.is_empty(),
        "days_before_expiration must contain at least one value",
    )?;
    for d in days {
        ensure(
            (MIN_REMINDER_DAYS..=MAX_REMINDER_DAYS).contains(d),
            "days_before_expiration values must be between 1 and 365",
        )?;
    }
    let mut out = days.to_vec();
    out.sort_unstable();
    out.dedup();
    Ok(out)
}
