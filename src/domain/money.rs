use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100` rounded to two places; zero when `whole` is not positive.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round2(part / whole * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rounds_midpoints_away_from_zero() {
        assert_eq!(round2(dec!(1.005)), dec!(1.01));
        assert_eq!(round2(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round2(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage(dec!(1), dec!(3)), dec!(33.33));
        assert_eq!(percentage(dec!(50), dec!(200)), dec!(25));
    }
}
