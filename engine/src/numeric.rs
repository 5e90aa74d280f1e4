//! Lenient numeric parsing and the money rounding policy
//!
//! Form fields and imported spreadsheets deliver numbers as text, often
//! with a comma decimal separator. The policy here is deliberate: anything
//! that does not parse as a non-negative number coerces to zero instead of
//! propagating an error, because a half-typed field must never break the
//! live recomputation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Number of decimal places authoritative for money values
pub const MONEY_DP: u32 = 2;

/// Parse a decimal leniently, coercing failures to zero
///
/// Accepts both `.` and `,` as the decimal separator and ignores
/// surrounding whitespace. Negative values coerce to zero; every factor
/// in the pricing formula is non-negative by contract.
///
/// # Example
/// ```
/// use rust_decimal_macros::dec;
/// use shnq_costing_core_rs::numeric::parse_lenient_decimal;
///
/// assert_eq!(parse_lenient_decimal("8,41"), dec!(8.41));
/// assert_eq!(parse_lenient_decimal(" 1271000.00 "), dec!(1271000.00));
/// assert_eq!(parse_lenient_decimal("abc"), dec!(0));
/// assert_eq!(parse_lenient_decimal("-5"), dec!(0));
/// ```
pub fn parse_lenient_decimal(input: &str) -> Decimal {
    let normalized = input.trim().replace(',', ".");
    match Decimal::from_str(&normalized) {
        Ok(value) if value.is_sign_positive() || value.is_zero() => value,
        _ => Decimal::ZERO,
    }
}

/// Parse an employee count leniently, coercing failures to zero
///
/// Fractional input truncates toward zero, matching how the form layer
/// coerces count fields.
///
/// # Example
/// ```
/// use shnq_costing_core_rs::numeric::parse_lenient_count;
///
/// assert_eq!(parse_lenient_count("3"), 3);
/// assert_eq!(parse_lenient_count("2,9"), 2);
/// assert_eq!(parse_lenient_count("-1"), 0);
/// assert_eq!(parse_lenient_count(""), 0);
/// ```
pub fn parse_lenient_count(input: &str) -> u32 {
    parse_lenient_decimal(input).trunc().to_u32().unwrap_or(0)
}

/// Round a money value to [`MONEY_DP`] places, half away from zero
///
/// Applied only at snapshot/persistence boundaries; the live pipeline keeps
/// full precision so repeated recomputation cannot compound rounding error.
///
/// # Example
/// ```
/// use rust_decimal_macros::dec;
/// use shnq_costing_core_rs::numeric::round_money;
///
/// assert_eq!(round_money(dec!(2.005)), dec!(2.01));
/// assert_eq!(round_money(dec!(2.004)), dec!(2.00));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn comma_separator_parses() {
        assert_eq!(parse_lenient_decimal("1,5"), dec!(1.5));
        assert_eq!(parse_lenient_decimal("0,00"), dec!(0));
    }

    #[test]
    fn garbage_and_negatives_coerce_to_zero() {
        for bad in ["", "  ", "12a", "NaN", "-0.01", "--3", "1.2.3"] {
            assert_eq!(parse_lenient_decimal(bad), Decimal::ZERO, "input {bad:?}");
        }
    }

    #[test]
    fn counts_truncate_fractions() {
        assert_eq!(parse_lenient_count("4.99"), 4);
        assert_eq!(parse_lenient_count("4,01"), 4);
        assert_eq!(parse_lenient_count("0"), 0);
    }

    #[test]
    fn oversized_counts_coerce_to_zero() {
        assert_eq!(parse_lenient_count("99999999999999999999"), 0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_money(dec!(16559999.995)), dec!(16560000.00));
        assert_eq!(round_money(dec!(0.125)), dec!(0.13));
    }
}
