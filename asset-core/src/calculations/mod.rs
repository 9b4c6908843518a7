//! Valuation logic for registered assets.
//!
//! Everything here is a pure function of its inputs; callers supply the
//! evaluation date explicitly.

pub mod common;
pub mod depreciation;

pub use depreciation::{
    DepreciationError, DepreciationPolicy, DepreciationSnapshot, ScheduleRow, age_in_months,
    compute_depreciation, depreciation_schedule,
};
