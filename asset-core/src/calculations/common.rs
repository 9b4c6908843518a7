//! Shared decimal helpers for asset valuation.
//!
//! Every monetary value leaving this crate passes through [`round_half_up`],
//! so book values and depreciation amounts always carry exactly two decimal
//! places.

use rust_decimal::Decimal;

/// Rounds a decimal value to two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero, matching how
/// currency amounts are presented to users.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use asset_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(26.6666)), dec!(26.67));
/// assert_eq!(round_half_up(dec!(0.005)), dec!(0.01));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use asset_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-20.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the smaller of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use asset_core::calculations::common::min;
///
/// assert_eq!(min(dec!(333.33), dec!(300)), dec!(300));
/// ```
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}
