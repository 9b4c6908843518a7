//! Read-only summaries built from loaded records.
//!
//! Nothing here touches a store; callers load the records they want to
//! report on and pass them in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculations::{DepreciationError, DepreciationPolicy, DepreciationSnapshot};
use crate::db::Entity;
use crate::lifecycle::retain_active;
use crate::models::{Asset, AssetStatus};

/// One active asset's line in a [`DepreciationRegister`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRow {
    pub asset_id: i64,
    pub tag: String,
    pub name: String,
    pub status: AssetStatus,
    pub snapshot: DepreciationSnapshot,
}

/// Depreciation state of every active asset on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepreciationRegister {
    pub as_of: NaiveDate,
    /// Rows in input order.
    pub rows: Vec<RegisterRow>,
    pub total_cost: Decimal,
    pub total_accumulated: Decimal,
    pub total_book_value: Decimal,
    pub status_counts: BTreeMap<AssetStatus, usize>,
    pub fully_depreciated: Vec<i64>,
    pub near_end_of_life: Vec<i64>,
    pub low_value: Vec<i64>,
}

impl DepreciationRegister {
    /// Builds the register, skipping archived assets.
    ///
    /// # Errors
    /// Returns [`DepreciationError`] when an asset has a negative cost.
    pub fn build(
        assets: &[Asset],
        policy: &DepreciationPolicy,
        as_of: NaiveDate,
    ) -> Result<Self, DepreciationError> {
        let mut register = Self {
            as_of,
            rows: Vec::new(),
            total_cost: Decimal::ZERO,
            total_accumulated: Decimal::ZERO,
            total_book_value: Decimal::ZERO,
            status_counts: BTreeMap::new(),
            fully_depreciated: Vec::new(),
            near_end_of_life: Vec::new(),
            low_value: Vec::new(),
        };

        for asset in &retain_active(assets.to_vec()) {
            let snapshot = asset.depreciation(policy, as_of)?;

            register.total_cost += snapshot.cost;
            register.total_accumulated += snapshot.accumulated_depreciation;
            register.total_book_value += snapshot.current_book_value;
            *register.status_counts.entry(asset.status).or_default() += 1;
            if snapshot.is_fully_depreciated() {
                register.fully_depreciated.push(asset.id);
            }
            if snapshot.is_near_end_of_life() {
                register.near_end_of_life.push(asset.id);
            }
            if snapshot.is_low_value() {
                register.low_value.push(asset.id);
            }

            register.rows.push(RegisterRow {
                asset_id: asset.id,
                tag: asset.tag.clone(),
                name: asset.name.clone(),
                status: asset.status,
                snapshot,
            });
        }

        Ok(register)
    }
}

/// Display text for a reference to another record.
///
/// Looks `id` up in `records` and returns its label; a reference that is
/// not among them (archived or gone) shows as `#<id>`, and no reference
/// shows as `—`.
pub fn label_or_id<E: Entity>(
    id: Option<i64>,
    records: &[E],
    label: impl Fn(&E) -> &str,
) -> String {
    let Some(id) = id else {
        return "—".to_string();
    };
    records
        .iter()
        .find(|record| record.id() == id)
        .map(|record| label(record).to_string())
        .unwrap_or_else(|| format!("#{id}"))
}
