//! Scheduling and closing maintenance work.
//!
//! Starting work puts the asset into `Maintenance`; completing or
//! cancelling it puts the asset back in service, `In Use` when it still
//! has a holder and `Available` otherwise. Disposed assets take no work.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use super::{Result, ServiceError, ensure_active};
use crate::db::InventoryStore;
use crate::drafts::{DraftError, MaintenanceDraft};
use crate::models::{Asset, AssetStatus, MaintenanceRecord, MaintenanceStatus};

fn invalid(
    record: &MaintenanceRecord,
    action: &'static str,
) -> ServiceError {
    ServiceError::InvalidTransition {
        kind: "maintenance record",
        id: record.id,
        status: record.status.as_str().to_string(),
        action,
    }
}

fn ensure_serviceable(
    asset: &Asset,
    action: &'static str,
) -> Result<()> {
    ensure_active(asset)?;
    if asset.status == AssetStatus::Disposed {
        return Err(ServiceError::InvalidTransition {
            kind: "asset",
            id: asset.id,
            status: asset.status.to_string(),
            action,
        });
    }
    Ok(())
}

/// Books maintenance for an active, not disposed asset.
pub async fn schedule_maintenance(
    store: &dyn InventoryStore,
    draft: &MaintenanceDraft,
    actor: &str,
) -> Result<MaintenanceRecord> {
    let new = draft.validate()?;
    let asset = store.assets().get(new.asset_id).await?;
    ensure_serviceable(&asset, "schedule maintenance for")?;

    let record = store.maintenance().create(new, actor).await?;
    info!(
        record_id = record.id,
        asset_id = asset.id,
        scheduled = %record.scheduled_date,
        actor,
        "maintenance scheduled"
    );
    Ok(record)
}

/// Begins scheduled work and takes the asset out of service.
pub async fn start_maintenance(
    store: &dyn InventoryStore,
    record_id: i64,
    actor: &str,
) -> Result<MaintenanceRecord> {
    let mut record = store.maintenance().get(record_id).await?;
    ensure_active(&record)?;
    if record.status != MaintenanceStatus::Scheduled {
        return Err(invalid(&record, "start"));
    }
    let mut asset = store.assets().get(record.asset_id).await?;
    ensure_serviceable(&asset, "start maintenance on")?;

    record.status = MaintenanceStatus::InProgress;
    store.maintenance().update(&record).await?;
    asset.status = AssetStatus::Maintenance;
    store.assets().update(&asset).await?;

    info!(record_id, asset_id = asset.id, actor, "maintenance started");
    Ok(store.maintenance().get(record_id).await?)
}

/// Closes open work on `completed_on`, recording the final cost when
/// given. A negative cost is rejected.
pub async fn complete_maintenance(
    store: &dyn InventoryStore,
    record_id: i64,
    completed_on: NaiveDate,
    cost: Option<Decimal>,
    actor: &str,
) -> Result<MaintenanceRecord> {
    let mut record = store.maintenance().get(record_id).await?;
    ensure_active(&record)?;
    if record.status.is_closed() {
        return Err(invalid(&record, "complete"));
    }
    if cost.is_some_and(|c| c < Decimal::ZERO) {
        return Err(DraftError::Invalid(vec!["Cost cannot be negative.".to_string()]).into());
    }

    record.status = MaintenanceStatus::Completed;
    record.completed_date = Some(completed_on);
    if cost.is_some() {
        record.cost = cost;
    }
    store.maintenance().update(&record).await?;
    return_to_service(store, record.asset_id).await?;

    info!(record_id, completed = %completed_on, actor, "maintenance completed");
    Ok(store.maintenance().get(record_id).await?)
}

/// Drops open work without completing it.
pub async fn cancel_maintenance(
    store: &dyn InventoryStore,
    record_id: i64,
    actor: &str,
) -> Result<MaintenanceRecord> {
    let mut record = store.maintenance().get(record_id).await?;
    ensure_active(&record)?;
    if record.status.is_closed() {
        return Err(invalid(&record, "cancel"));
    }

    record.status = MaintenanceStatus::Cancelled;
    store.maintenance().update(&record).await?;
    return_to_service(store, record.asset_id).await?;

    info!(record_id, actor, "maintenance cancelled");
    Ok(store.maintenance().get(record_id).await?)
}

async fn return_to_service(
    store: &dyn InventoryStore,
    asset_id: i64,
) -> Result<()> {
    let mut asset = store.assets().get(asset_id).await?;
    if asset.status == AssetStatus::Maintenance {
        asset.status = if asset.assigned_to.is_some() {
            AssetStatus::InUse
        } else {
            AssetStatus::Available
        };
        store.assets().update(&asset).await?;
    }
    Ok(())
}

fn open(record: &MaintenanceRecord) -> bool {
    !record.archived && !record.status.is_closed()
}

/// Open work due between `as_of` and `within_days` later, inclusive,
/// earliest first.
pub fn upcoming_maintenance(
    records: &[MaintenanceRecord],
    as_of: NaiveDate,
    within_days: u32,
) -> Vec<&MaintenanceRecord> {
    let horizon = as_of
        .checked_add_days(Days::new(u64::from(within_days)))
        .unwrap_or(NaiveDate::MAX);
    let mut due: Vec<_> = records
        .iter()
        .filter(|r| open(r) && r.scheduled_date >= as_of && r.scheduled_date <= horizon)
        .collect();
    due.sort_by_key(|r| (r.scheduled_date, r.id));
    due
}

/// Open work whose scheduled date has already passed, oldest first.
pub fn overdue_maintenance(
    records: &[MaintenanceRecord],
    as_of: NaiveDate,
) -> Vec<&MaintenanceRecord> {
    let mut late: Vec<_> = records
        .iter()
        .filter(|r| open(r) && r.scheduled_date < as_of)
        .collect();
    late.sort_by_key(|r| (r.scheduled_date, r.id));
    late
}
