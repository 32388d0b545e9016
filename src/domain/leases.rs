use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, ensure, non_blank};

crate::text_enum!(LeaseStatus {
    Future => "FUTURE",
    Active => "ACTIVE",
    Ended => "ENDED",
    Terminated => "TERMINATED",
});

impl LeaseStatus {
    /// Statuses that still hold the unit.
    pub const OPEN: [LeaseStatus; 2] = [LeaseStatus::Future, LeaseStatus::Active];

    pub fn is_open(&self) -> bool {
        Self::OPEN.contains(self)
    }

    /// Status implied by the calendar; dates compare without time of day.
    pub fn for_dates(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        if today < start {
            LeaseStatus::Future
        } else if today <= end {
            LeaseStatus::Active
        } else {
            LeaseStatus::Ended
        }
    }

    /// Recomputes a stored status. Termination is never undone by the calendar.
    pub fn refreshed(self, start: NaiveDate, end: NaiveDate, today: NaiveDate) -> Self {
        match self {
            LeaseStatus::Terminated => LeaseStatus::Terminated,
            _ => Self::for_dates(start, end, today),
        }
    }
}

/// Inclusive date ranges share at least one day.
pub fn periods_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaseFields {
    pub unit_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[schema(value_type = String)]
    pub monthly_rent: Decimal,
    pub payment_to: String,
    pub notes: Option<String>,
}

impl LeaseFields {
    pub fn validate(&self) -> RuleResult {
        ensure(
            self.end_date > self.start_date,
            "end_date must be after start_date",
        )?;
        ensure(
            self.monthly_rent >= Decimal::ZERO,
            "monthly_rent must not be negative",
        )?;
        non_blank(&self.payment_to, "payment_to")
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Lease {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: LeaseFields,
    pub status: LeaseStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LeasePatch {
    pub unit_id: Option<Uuid>,
    pub tenant_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>)]
    pub monthly_rent: Option<Decimal>,
    pub payment_to: Option<String>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl LeasePatch {
    pub fn apply(self, f: &mut LeaseFields) {
        set_if(self.unit_id, &mut f.unit_id);
        set_if(self.tenant_id, &mut f.tenant_id);
        set_if(self.start_date, &mut f.start_date);
        set_if(self.end_date, &mut f.end_date);
        set_if(self.monthly_rent, &mut f.monthly_rent);
        set_if(self.payment_to, &mut f.payment_to);
        self.notes.apply_to(&mut f.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn status_follows_the_calendar_inclusively() {
        let (start, end) = (d("2024-01-01"), d("2024-12-31"));
        assert_eq!(
            LeaseStatus::for_dates(start, end, d("2023-12-31")),
            LeaseStatus::Future
        );
        assert_eq!(LeaseStatus::for_dates(start, end, start), LeaseStatus::Active);
        assert_eq!(LeaseStatus::for_dates(start, end, end), LeaseStatus::Active);
        assert_eq!(
            LeaseStatus::for_dates(start, end, d("2025-01-01")),
            LeaseStatus::Ended
        );
    }

    #[test]
    fn terminated_leases_stay_terminated() {
        let (start, end) = (d("2024-01-01"), d("2024-12-31"));
        assert_eq!(
            LeaseStatus::Terminated.refreshed(start, end, d("2024-06-01")),
            LeaseStatus::Terminated
        );
        assert_eq!(
            LeaseStatus::Future.refreshed(start, end, d("2024-06-01")),
            LeaseStatus::Active
        );
    }

    #[test]
    fn touching_periods_overlap() {
        assert!(periods_overlap(
            d("2024-01-01"),
            d("2024-06-30"),
            d("2024-06-30"),
            d("2024-12-31")
        ));
        assert!(!periods_overlap(
            d("2024-01-01"),
            d("2024-06-29"),
            d("2024-06-30"),
            d("2024-12-31")
        ));
    }

    #[test]
    fn end_must_follow_start_and_rent_is_non_negative() {
        let mut f = LeaseFields {
            unit_id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            start_date: d("2024-01-01"),
            end_date: d("2024-01-01"),
            monthly_rent: dec!(5000),
            payment_to: "Owner".into(),
            notes: None,
        };
        assert!(f.validate().is_err());
        f.end_date = d("2024-12-31");
        assert!(f.validate().is_ok());
        f.monthly_rent = dec!(-1);
        assert!(f.validate().is_err());
    }
}
