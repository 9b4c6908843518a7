//! Straight-line depreciation for registered assets.
//!
//! Depreciation is evaluated at month granularity. The day of month is
//! ignored: an asset bought on the 28th and checked on the 1st of the next
//! month counts as one month old.
//!
//! | Value | Formula |
//! |-------|---------|
//! | age in months | `(as_of.year - purchase.year) * 12 + (as_of.month - purchase.month)`, floored at 0 |
//! | monthly depreciation | `cost / (useful_life_years * 12)`, or 0 when the life is 0 |
//! | accumulated depreciation | `min(cost, monthly * age)` |
//! | current book value | `max(0, cost - accumulated)` |
//! | remaining months | `max(0, useful_life_years * 12 - age)` |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use asset_core::calculations::compute_depreciation;
//!
//! let purchased = NaiveDate::from_ymd_opt(2023, 3, 15).unwrap();
//! let as_of = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//!
//! let snapshot = compute_depreciation(dec!(1200), Some(purchased), 5, as_of).unwrap();
//!
//! assert_eq!(snapshot.age_in_months, 24);
//! assert_eq!(snapshot.monthly_depreciation, dec!(20.00));
//! assert_eq!(snapshot.accumulated_depreciation, dec!(480.00));
//! assert_eq!(snapshot.current_book_value, dec!(720.00));
//! ```

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{max, min, round_half_up};

/// Remaining months at or below which an asset is flagged as near the end
/// of its useful life.
pub const NEAR_END_OF_LIFE_MONTHS: u32 = 6;

/// Book value below this share of cost marks an asset as low value.
pub const LOW_VALUE_RATIO: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Errors that can occur while computing depreciation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DepreciationError {
    /// Cost basis must be zero or positive.
    #[error("cost basis cannot be negative: {0}")]
    NegativeCost(Decimal),
}

/// Useful-life policy applied when an asset has no explicit useful life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepreciationPolicy {
    /// Useful life in years used when the asset record leaves it unset.
    pub default_useful_life_years: u32,
}

impl DepreciationPolicy {
    /// Policy that never depreciates assets lacking an explicit useful life.
    pub const NO_DEFAULT_LIFE: Self = Self {
        default_useful_life_years: 0,
    };

    /// Resolves the useful life to depreciate over.
    pub fn useful_life_years(
        &self,
        explicit: Option<u32>,
    ) -> u32 {
        explicit.unwrap_or(self.default_useful_life_years)
    }
}

impl Default for DepreciationPolicy {
    fn default() -> Self {
        Self {
            default_useful_life_years: 5,
        }
    }
}

/// Depreciation state of a single asset at an evaluation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepreciationSnapshot {
    /// Cost basis, rounded to two places.
    pub cost: Decimal,
    pub useful_life_years: u32,
    pub age_in_months: u32,
    pub monthly_depreciation: Decimal,
    pub accumulated_depreciation: Decimal,
    pub current_book_value: Decimal,
    pub remaining_months: u32,
}

impl DepreciationSnapshot {
    /// True once the book value has reached zero.
    pub fn is_fully_depreciated(&self) -> bool {
        self.current_book_value == Decimal::ZERO
    }

    /// True when the asset still carries value but has six months or less
    /// of useful life left.
    pub fn is_near_end_of_life(&self) -> bool {
        !self.is_fully_depreciated() && self.remaining_months <= NEAR_END_OF_LIFE_MONTHS
    }

    /// True when the book value is positive but below 10% of cost.
    pub fn is_low_value(&self) -> bool {
        self.current_book_value > Decimal::ZERO
            && self.current_book_value < self.cost * LOW_VALUE_RATIO
    }
}

/// One month-end row of a depreciation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month of useful life.
    pub period: u32,
    /// Month the period closes in, when the purchase date is known.
    pub month: Option<NaiveDate>,
    pub accumulated_depreciation: Decimal,
    pub book_value: Decimal,
}

/// Number of whole calendar months between the purchase date and `as_of`.
///
/// Returns 0 when the purchase date is missing or lies in the future.
pub fn age_in_months(
    purchase_date: Option<NaiveDate>,
    as_of: NaiveDate,
) -> u32 {
    let Some(purchased) = purchase_date else {
        return 0;
    };
    let months = (as_of.year() - purchased.year()) * 12 + as_of.month() as i32
        - purchased.month() as i32;
    u32::try_from(months).unwrap_or(0)
}

/// Computes the straight-line depreciation snapshot of an asset.
///
/// # Errors
///
/// Returns [`DepreciationError::NegativeCost`] when `cost` is below zero.
pub fn compute_depreciation(
    cost: Decimal,
    purchase_date: Option<NaiveDate>,
    useful_life_years: u32,
    as_of: NaiveDate,
) -> Result<DepreciationSnapshot, DepreciationError> {
    if cost < Decimal::ZERO {
        return Err(DepreciationError::NegativeCost(cost));
    }

    let cost = round_half_up(cost);
    let age = age_in_months(purchase_date, as_of);
    let life_months = u64::from(useful_life_years) * 12;
    let rate = monthly_rate(cost, life_months);

    let accumulated = accumulated_at(cost, rate, u64::from(age));
    let book_value = max(round_half_up(cost - accumulated), Decimal::ZERO);
    let remaining = life_months.saturating_sub(u64::from(age));

    Ok(DepreciationSnapshot {
        cost,
        useful_life_years,
        age_in_months: age,
        monthly_depreciation: round_half_up(rate),
        accumulated_depreciation: accumulated,
        current_book_value: book_value,
        remaining_months: u32::try_from(remaining).unwrap_or(u32::MAX),
    })
}

/// Builds the month-by-month schedule over the full useful life.
///
/// Returns an empty schedule when the useful life is zero.
///
/// # Errors
///
/// Returns [`DepreciationError::NegativeCost`] when `cost` is below zero.
pub fn depreciation_schedule(
    cost: Decimal,
    purchase_date: Option<NaiveDate>,
    useful_life_years: u32,
) -> Result<Vec<ScheduleRow>, DepreciationError> {
    if cost < Decimal::ZERO {
        return Err(DepreciationError::NegativeCost(cost));
    }

    let cost = round_half_up(cost);
    let life_months = useful_life_years.saturating_mul(12);
    let rate = monthly_rate(cost, u64::from(life_months));

    let rows = (1..=life_months)
        .map(|period| {
            let accumulated = accumulated_at(cost, rate, u64::from(period));
            ScheduleRow {
                period,
                month: purchase_date
                    .and_then(|d| d.with_day(1))
                    .and_then(|d| d.checked_add_months(Months::new(period))),
                accumulated_depreciation: accumulated,
                book_value: max(round_half_up(cost - accumulated), Decimal::ZERO),
            }
        })
        .collect();

    Ok(rows)
}

/// Unrounded monthly depreciation; zero when there is no useful life.
fn monthly_rate(
    cost: Decimal,
    life_months: u64,
) -> Decimal {
    if life_months == 0 {
        Decimal::ZERO
    } else {
        cost / Decimal::from(life_months)
    }
}

/// Accumulated depreciation after `months`, capped at cost. A product too
/// large for `Decimal` is past the cap.
fn accumulated_at(
    cost: Decimal,
    rate: Decimal,
    months: u64,
) -> Decimal {
    let accumulated = rate
        .checked_mul(Decimal::from(months))
        .map_or(cost, |total| min(cost, total));
    round_half_up(accumulated)
}
