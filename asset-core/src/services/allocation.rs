//! Where an asset sits and who holds it.

use tracing::info;

use super::{Result, ServiceError, ensure_active};
use crate::db::InventoryStore;
use crate::models::{Asset, AssetStatus};

async fn active_asset(
    store: &dyn InventoryStore,
    asset_id: i64,
    action: &'static str,
) -> Result<Asset> {
    let asset = store.assets().get(asset_id).await?;
    ensure_active(&asset)?;
    if asset.status == AssetStatus::Disposed {
        return Err(ServiceError::InvalidTransition {
            kind: "asset",
            id: asset.id,
            status: asset.status.to_string(),
            action,
        });
    }
    Ok(asset)
}

async fn save(
    store: &dyn InventoryStore,
    asset: &Asset,
) -> Result<Asset> {
    store.assets().update(asset).await?;
    Ok(store.assets().get(asset.id).await?)
}

/// Moves an asset into a room. The asset's status is unchanged.
pub async fn assign_room(
    store: &dyn InventoryStore,
    asset_id: i64,
    room_id: i64,
    actor: &str,
) -> Result<Asset> {
    let mut asset = active_asset(store, asset_id, "move").await?;
    let room = store.rooms().get(room_id).await?;
    ensure_active(&room)?;

    asset.room_id = Some(room.id);
    let asset = save(store, &asset).await?;
    info!(asset_id, room_id, actor, "asset moved");
    Ok(asset)
}

/// Hands an available asset to an employee and marks it in use.
pub async fn assign_employee(
    store: &dyn InventoryStore,
    asset_id: i64,
    employee_id: i64,
    actor: &str,
) -> Result<Asset> {
    let mut asset = active_asset(store, asset_id, "assign").await?;
    if asset.status == AssetStatus::Maintenance {
        return Err(ServiceError::InvalidTransition {
            kind: "asset",
            id: asset.id,
            status: asset.status.to_string(),
            action: "assign",
        });
    }
    let employee = store.employees().get(employee_id).await?;
    ensure_active(&employee)?;

    asset.assigned_to = Some(employee.id);
    asset.status = AssetStatus::InUse;
    let asset = save(store, &asset).await?;
    info!(asset_id, employee_id, actor, "asset assigned");
    Ok(asset)
}

/// Takes an asset back from its holder and makes it available again.
pub async fn release(
    store: &dyn InventoryStore,
    asset_id: i64,
    actor: &str,
) -> Result<Asset> {
    let mut asset = active_asset(store, asset_id, "release").await?;
    if asset.status != AssetStatus::InUse {
        return Err(ServiceError::InvalidTransition {
            kind: "asset",
            id: asset.id,
            status: asset.status.to_string(),
            action: "release",
        });
    }

    asset.assigned_to = None;
    asset.status = AssetStatus::Available;
    let asset = save(store, &asset).await?;
    info!(asset_id, actor, "asset released");
    Ok(asset)
}

/// Retires an asset for good. Disposal clears the holder but keeps the
/// room so the asset's last location stays on record.
pub async fn dispose(
    store: &dyn InventoryStore,
    asset_id: i64,
    actor: &str,
) -> Result<Asset> {
    let mut asset = active_asset(store, asset_id, "dispose").await?;

    asset.assigned_to = None;
    asset.status = AssetStatus::Disposed;
    let asset = save(store, &asset).await?;
    info!(asset_id, actor, "asset disposed");
    Ok(asset)
}
