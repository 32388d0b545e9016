use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A business rule rejected the submitted values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RuleViolation(pub String);

impl RuleViolation {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

pub type RuleResult = Result<(), RuleViolation>;

pub fn ensure(cond: bool, msg: &str) -> RuleResult {
    if cond {
        Ok(())
    } else {
        Err(RuleViolation::new(msg))
    }
}

pub fn percentage_in_range(value: Decimal, field: &str) -> RuleResult {
    ensure(
        value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED,
        &format!("{field} must be between 0 and 100"),
    )
}

pub fn end_after_start(start: NaiveDate, end: Option<NaiveDate>) -> RuleResult {
    match end {
        Some(end) => ensure(end > start, "end_date must be after start_date"),
        None => Ok(()),
    }
}

pub fn non_blank(value: &str, field: &str) -> RuleResult {
    ensure(!value.trim().is_empty(), &format!("{field} must not be empty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(percentage_in_range(dec!(0), "p").is_ok());
        assert!(percentage_in_range(dec!(100), "p").is_ok());
        assert_eq!(
            percentage_in_range(dec!(100.01), "share").unwrap_err().0,
            "share must be between 0 and 100"
        );
    }

    #[test]
    fn end_date_must_follow_start_date() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert!(end_after_start(d("2024-01-01"), None).is_ok());
        assert!(end_after_start(d("2024-01-01"), Some(d("2024-01-02"))).is_ok());
        assert!(end_after_start(d("2024-01-01"), Some(d("2024-01-01"))).is_err());
    }
}
