use num_traits::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};

/// Converts a stored amount into a Decimal for exact accumulation.
pub fn to_decimal(amount: f64) -> Result<Decimal> {
    Decimal::from_f64(amount).ok_or_else(|| {
        Error::Unexpected(format!("Amount {} is outside the decimal range", amount))
    })
}

/// Adds `amount` to a running total, failing instead of overflowing.
pub fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| Error::Unexpected("Amount total overflowed".to_string()))
}

/// Rounds a money value for display (half away from zero).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn float_amounts_sum_exactly() {
        let total = [0.1, 0.2, 0.3]
            .iter()
            .try_fold(Decimal::ZERO, |acc, a| checked_sum(acc, to_decimal(*a)?))
            .unwrap();
        assert_eq!(total, dec!(0.6));
    }

    #[test]
    fn out_of_range_amounts_are_errors() {
        assert!(matches!(to_decimal(1e29), Err(Error::Unexpected(_))));
        assert!(matches!(to_decimal(f64::NAN), Err(Error::Unexpected(_))));
        assert!(matches!(
            checked_sum(Decimal::MAX, dec!(1)),
            Err(Error::Unexpected(_))
        ));
        assert_eq!(checked_sum(dec!(1.5), dec!(2.25)).unwrap(), dec!(3.75));
    }

    #[test]
    fn rounding_keeps_two_places() {
        assert_eq!(round_money(dec!(10.005)), dec!(10.01));
        assert_eq!(round_money(dec!(-10.005)), dec!(-10.01));
        assert_eq!(round_money(dec!(98500)), dec!(98500));
    }
}
