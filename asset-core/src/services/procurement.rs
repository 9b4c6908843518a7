//! Purchase orders and the assets they bring in.

use chrono::NaiveDate;
use tracing::{info, warn};

use super::{Result, ServiceError, ensure_active};
use crate::calculations::{DepreciationPolicy, DepreciationSnapshot};
use crate::db::InventoryStore;
use crate::drafts::PurchaseOrderDraft;
use crate::models::{Asset, AssetStatus, NewAsset, OrderStatus, PurchaseOrder};

/// Outcome of [`place_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procurement {
    pub order: PurchaseOrder,
    pub asset: Asset,
    /// Depreciation of the new asset on the day the order was placed.
    pub depreciation: DepreciationSnapshot,
}

/// Registers the asset an order buys, then records the order against it.
///
/// The asset takes its tag from the order number, its cost from the unit
/// cost and its purchase date from the order date. Its useful life is the
/// order's, else the category default, else whatever `policy` resolves.
///
/// # Errors
/// * [`ServiceError::Draft`] when the draft does not validate.
/// * [`ServiceError::Archived`] when the chosen category is archived.
/// * Repository errors from either insert. If the order insert fails the
///   asset has already been created and stays registered.
pub async fn place_order(
    store: &dyn InventoryStore,
    draft: &PurchaseOrderDraft,
    actor: &str,
    policy: &DepreciationPolicy,
    as_of: NaiveDate,
) -> Result<Procurement> {
    let mut new_order = draft.validate()?;

    let category_life = match new_order.category_id {
        Some(category_id) => {
            let category = store.categories().get(category_id).await?;
            ensure_active(&category)?;
            category.default_useful_life_years
        }
        None => None,
    };

    let asset = store
        .assets()
        .create(
            NewAsset {
                tag: new_order.order_number.clone(),
                name: new_order.item_name.clone(),
                description: Some(format!(
                    "{} x {} from {}",
                    new_order.quantity, new_order.item_name, new_order.supplier
                )),
                serial_number: None,
                category_id: new_order.category_id,
                room_id: None,
                assigned_to: None,
                value: new_order.unit_cost,
                purchase_price: Some(new_order.unit_cost),
                purchase_date: Some(new_order.order_date),
                useful_life_years: new_order.useful_life_years.or(category_life),
                status: AssetStatus::Available,
            },
            actor,
        )
        .await?;
    let depreciation = asset.depreciation(policy, as_of)?;

    new_order.asset_id = Some(asset.id);
    let order = match store.purchase_orders().create(new_order, actor).await {
        Ok(order) => order,
        Err(err) => {
            warn!(
                asset_id = asset.id,
                tag = %asset.tag,
                error = %err,
                "asset registered but purchase order was not recorded"
            );
            return Err(err.into());
        }
    };

    info!(
        order_id = order.id,
        order_number = %order.order_number,
        asset_id = asset.id,
        total = %order.total_cost(),
        actor,
        "purchase order placed"
    );
    Ok(Procurement {
        order,
        asset,
        depreciation,
    })
}

async fn transition_order(
    store: &dyn InventoryStore,
    order_id: i64,
    actor: &str,
    action: &'static str,
    allowed: &[OrderStatus],
    target: OrderStatus,
) -> Result<PurchaseOrder> {
    let mut order = store.purchase_orders().get(order_id).await?;
    ensure_active(&order)?;
    if !allowed.contains(&order.status) {
        return Err(ServiceError::InvalidTransition {
            kind: "purchase order",
            id: order.id,
            status: order.status.as_str().to_string(),
            action,
        });
    }

    order.status = target;
    store.purchase_orders().update(&order).await?;
    info!(
        order_id,
        status = target.as_str(),
        actor,
        "purchase order updated"
    );
    Ok(store.purchase_orders().get(order_id).await?)
}

/// Marks a pending order as approved.
pub async fn approve_order(
    store: &dyn InventoryStore,
    order_id: i64,
    actor: &str,
) -> Result<PurchaseOrder> {
    transition_order(
        store,
        order_id,
        actor,
        "approve",
        &[OrderStatus::Pending],
        OrderStatus::Approved,
    )
    .await
}

/// Marks a pending or approved order as received.
pub async fn receive_order(
    store: &dyn InventoryStore,
    order_id: i64,
    actor: &str,
) -> Result<PurchaseOrder> {
    transition_order(
        store,
        order_id,
        actor,
        "receive",
        &[OrderStatus::Pending, OrderStatus::Approved],
        OrderStatus::Received,
    )
    .await
}

/// Cancels an order that has not been received. The asset registered for
/// it is left untouched.
pub async fn cancel_order(
    store: &dyn InventoryStore,
    order_id: i64,
    actor: &str,
) -> Result<PurchaseOrder> {
    transition_order(
        store,
        order_id,
        actor,
        "cancel",
        &[OrderStatus::Pending, OrderStatus::Approved],
        OrderStatus::Cancelled,
    )
    .await
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::db::{ListFilter, MemoryStore, RepositoryError};
    use crate::drafts::DraftError;
    use crate::models::NewCategory;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    fn draft() -> PurchaseOrderDraft {
        PurchaseOrderDraft {
            order_number: "PO-2025-014".to_string(),
            supplier: "Northwind".to_string(),
            item_name: "Conference display".to_string(),
            quantity: "2".to_string(),
            unit_cost: "1200".to_string(),
            order_date: "2025-03-01".to_string(),
            useful_life_years: "5".to_string(),
            ..PurchaseOrderDraft::default()
        }
    }

    #[tokio::test]
    async fn place_order_creates_asset_and_order() {
        let store = MemoryStore::new();

        let placed = place_order(&store, &draft(), "erin", &DepreciationPolicy::default(), as_of())
            .await
            .unwrap();

        assert_eq!(placed.asset.tag, "PO-2025-014");
        assert_eq!(placed.asset.status, AssetStatus::Available);
        assert_eq!(placed.asset.purchase_price, Some(dec!(1200)));
        assert_eq!(placed.asset.purchase_date, Some(as_of()));
        assert_eq!(placed.order.asset_id, Some(placed.asset.id));
        assert_eq!(placed.order.status, OrderStatus::Pending);
        assert_eq!(placed.order.total_cost(), dec!(2400));
        assert_eq!(placed.depreciation.monthly_depreciation, dec!(20.00));
        assert_eq!(placed.depreciation.current_book_value, dec!(1200));
    }

    #[tokio::test]
    async fn place_order_falls_back_to_category_life() {
        let store = MemoryStore::new();
        let category = store
            .categories()
            .create(
                NewCategory {
                    name: "Displays".to_string(),
                    description: None,
                    default_useful_life_years: Some(4),
                },
                "erin",
            )
            .await
            .unwrap();
        let draft = PurchaseOrderDraft {
            category_id: Some(category.id),
            useful_life_years: String::new(),
            ..draft()
        };

        let placed = place_order(&store, &draft, "erin", &DepreciationPolicy::default(), as_of())
            .await
            .unwrap();

        assert_eq!(placed.asset.useful_life_years, Some(4));
        assert_eq!(placed.depreciation.useful_life_years, 4);
    }

    #[tokio::test]
    async fn place_order_rejects_archived_category() {
        let store = MemoryStore::new();
        let category = store
            .categories()
            .create(
                NewCategory {
                    name: "Retired".to_string(),
                    description: None,
                    default_useful_life_years: None,
                },
                "erin",
            )
            .await
            .unwrap();
        store.categories().toggle_archived(category.id, "erin").await.unwrap();
        let draft = PurchaseOrderDraft {
            category_id: Some(category.id),
            ..draft()
        };

        let result = place_order(&store, &draft, "erin", &DepreciationPolicy::default(), as_of()).await;

        assert_eq!(
            result.unwrap_err(),
            ServiceError::Archived {
                kind: "category",
                id: category.id
            }
        );
        assert!(store.assets().list(ListFilter::ALL).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_draft_writes_nothing() {
        let store = MemoryStore::new();
        let draft = PurchaseOrderDraft {
            unit_cost: "abc".to_string(),
            ..draft()
        };

        let result = place_order(&store, &draft, "erin", &DepreciationPolicy::default(), as_of()).await;

        assert!(matches!(result, Err(ServiceError::Draft(DraftError::Invalid(_)))));
        assert!(store.assets().list(ListFilter::ALL).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_order_number_keeps_first_order() {
        let store = MemoryStore::new();
        place_order(&store, &draft(), "erin", &DepreciationPolicy::default(), as_of())
            .await
            .unwrap();

        let result = place_order(&store, &draft(), "erin", &DepreciationPolicy::default(), as_of()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::Conflict(_)))
        ));
        assert_eq!(store.purchase_orders().list(ListFilter::ALL).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn orders_move_through_their_statuses() {
        let store = MemoryStore::new();
        let placed = place_order(&store, &draft(), "erin", &DepreciationPolicy::default(), as_of())
            .await
            .unwrap();

        let approved = approve_order(&store, placed.order.id, "erin").await.unwrap();
        assert_eq!(approved.status, OrderStatus::Approved);

        let received = receive_order(&store, placed.order.id, "erin").await.unwrap();
        assert_eq!(received.status, OrderStatus::Received);

        let result = cancel_order(&store, placed.order.id, "erin").await;
        assert_eq!(
            result.unwrap_err(),
            ServiceError::InvalidTransition {
                kind: "purchase order",
                id: placed.order.id,
                status: "Received".to_string(),
                action: "cancel",
            }
        );
    }

    #[tokio::test]
    async fn archived_orders_cannot_be_received() {
        let store = MemoryStore::new();
        let placed = place_order(&store, &draft(), "erin", &DepreciationPolicy::default(), as_of())
            .await
            .unwrap();
        store
            .purchase_orders()
            .toggle_archived(placed.order.id, "erin")
            .await
            .unwrap();

        let result = receive_order(&store, placed.order.id, "erin").await;

        assert!(matches!(result, Err(ServiceError::Archived { .. })));
    }
}
