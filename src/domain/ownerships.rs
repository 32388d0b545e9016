use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::patch::{DoubleOption, deserialize_double_option, set_if};
use crate::domain::rules::{RuleResult, end_after_start, percentage_in_range};

crate::text_enum!(OwnershipType {
    Full => "FULL",
    Partial => "PARTIAL",
    Partnership => "PARTNERSHIP",
    Company => "COMPANY",
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnershipFields {
    pub property_id: Uuid,
    pub owner_id: Uuid,
    #[schema(value_type = String)]
    pub ownership_percentage: Decimal,
    #[serde(default = "default_ownership_type")]
    pub ownership_type: OwnershipType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

fn default_ownership_type() -> OwnershipType {
    OwnershipType::Full
}

impl OwnershipFields {
    /// Only the range of a single share is checked; shares of a property are not summed.
    pub fn validate(&self) -> RuleResult {
        percentage_in_range(self.ownership_percentage, "ownership_percentage")?;
        end_after_start(self.start_date, self.end_date)
    }

    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.end_date.is_none_or(|end| end >= today)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Ownership {
    pub id: Uuid,
    pub account_id: Uuid,
    #[serde(flatten)]
    pub fields: OwnershipFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OwnershipPatch {
    #[schema(value_type = Option<String>)]
    pub ownership_percentage: Option<Decimal>,
    pub ownership_type: Option<OwnershipType>,
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub end_date: DoubleOption<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: DoubleOption<String>,
}

impl OwnershipPatch {
    pub fn apply(self, f: &mut OwnershipFields) {
        set_if(self.ownership_percentage, &mut f.ownership_percentage);
        set_if(self.ownership_type, &mut f.ownership_type);
        set_if(self.start_date, &mut f.start_date);
        self.end_date.apply_to(&mut f.end_date);
        self.notes.apply_to(&mut f.notes);
    }
}

/// Read-only view over the current shares of one property.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OwnershipSummary {
    #[schema(value_type = String)]
    pub total_percentage: Decimal,
    #[schema(value_type = String)]
    pub remaining_percentage: Decimal,
    pub is_over_allocated: bool,
    pub owner_count: usize,
}

impl OwnershipSummary {
    pub fn from_shares<'a>(
        shares: impl IntoIterator<Item = &'a OwnershipFields>,
        today: NaiveDate,
    ) -> Self {
        let mut total = Decimal::ZERO;
        let mut owners = std::collections::HashSet::new();
        for share in shares.into_iter().filter(|s| s.is_current(today)) {
            total += share.ownership_percentage;
            owners.insert(share.owner_id);
        }
        Self {
            total_percentage: total,
            remaining_percentage: (Decimal::ONE_HUNDRED - total).max(Decimal::ZERO),
            is_over_allocated: total > Decimal::ONE_HUNDRED,
            owner_count: owners.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn share(pct: Decimal, end: Option<&str>) -> OwnershipFields {
        OwnershipFields {
            property_id: Uuid::nil(),
            owner_id: Uuid::new_v4(),
            ownership_percentage: pct,
            ownership_type: OwnershipType::Partial,
            start_date: d("2020-01-01"),
            end_date: end.map(d),
            notes: None,
        }
    }

    #[test]
    fn shares_above_one_hundred_are_accepted_individually() {
        assert!(share(dec!(70), None).validate().is_ok());
        assert!(share(dec!(101), None).validate().is_err());
    }

    #[test]
    fn summary_reports_over_allocation_without_rejecting_it() {
        let shares = [share(dec!(70), None), share(dec!(45.5), None)];
        let s = OwnershipSummary::from_shares(&shares, d("2024-01-01"));
        assert_eq!(s.total_percentage, dec!(115.5));
        assert_eq!(s.remaining_percentage, Decimal::ZERO);
        assert!(s.is_over_allocated);
        assert_eq!(s.owner_count, 2);
    }

    #[test]
    fn ended_shares_are_left_out_of_the_summary() {
        let shares = [
            share(dec!(60), None),
            share(dec!(40), Some("2023-12-31")),
        ];
        let s = OwnershipSummary::from_shares(&shares, d("2024-01-01"));
        assert_eq!(s.total_percentage, dec!(60));
        assert_eq!(s.remaining_percentage, dec!(40));
        assert!(!s.is_over_allocated);
        assert_eq!(s.owner_count, 1);
    }
}
