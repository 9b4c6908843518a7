use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::{
    DepreciationError, DepreciationPolicy, DepreciationSnapshot, ScheduleRow,
    compute_depreciation, depreciation_schedule,
};
use crate::models::AuditInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetStatus {
    Available,
    #[serde(rename = "In Use")]
    InUse,
    Maintenance,
    Disposed,
    Archived,
}

impl AssetStatus {
    pub fn all() -> &'static [AssetStatus] {
        &[
            AssetStatus::Available,
            AssetStatus::InUse,
            AssetStatus::Maintenance,
            AssetStatus::Disposed,
            AssetStatus::Archived,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "In Use",
            Self::Maintenance => "Maintenance",
            Self::Disposed => "Disposed",
            Self::Archived => "Archived",
        }
    }

    /// Parses the display label, accepting any letter case.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered physical asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    /// Organization-unique inventory tag printed on the asset label.
    pub tag: String,
    pub name: String,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub category_id: Option<i64>,
    pub room_id: Option<i64>,
    /// Employee currently holding the asset.
    pub assigned_to: Option<i64>,
    /// Declared value, used as the cost basis when no purchase price is known.
    pub value: Decimal,
    pub purchase_price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub useful_life_years: Option<u32>,
    pub status: AssetStatus,
    /// Status to return to when an archived asset is restored.
    pub status_before_archive: Option<AssetStatus>,
    pub audit: AuditInfo,
}

impl Asset {
    /// Purchase price when recorded, otherwise the declared value.
    pub fn cost_basis(&self) -> Decimal {
        self.purchase_price.unwrap_or(self.value)
    }

    /// Depreciation state of this asset on `as_of`.
    pub fn depreciation(
        &self,
        policy: &DepreciationPolicy,
        as_of: NaiveDate,
    ) -> Result<DepreciationSnapshot, DepreciationError> {
        compute_depreciation(
            self.cost_basis(),
            self.purchase_date,
            policy.useful_life_years(self.useful_life_years),
            as_of,
        )
    }

    /// Month-by-month schedule over the asset's useful life.
    pub fn depreciation_schedule(
        &self,
        policy: &DepreciationPolicy,
    ) -> Result<Vec<ScheduleRow>, DepreciationError> {
        depreciation_schedule(
            self.cost_basis(),
            self.purchase_date,
            policy.useful_life_years(self.useful_life_years),
        )
    }
}

/// For registering new assets (no id or audit stamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAsset {
    pub tag: String,
    pub name: String,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub category_id: Option<i64>,
    pub room_id: Option<i64>,
    pub assigned_to: Option<i64>,
    pub value: Decimal,
    pub purchase_price: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub useful_life_years: Option<u32>,
    pub status: AssetStatus,
}
