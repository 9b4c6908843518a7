//! In-process backend keeping every table in a `BTreeMap`.
//!
//! Used by tests and by `--backend memory` runs. Nothing survives the
//! process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{Entity, InventoryStore, ListFilter, Repository, RepositoryError};
use crate::models::{
    Asset, AuditInfo, Category, Employee, MaintenanceRecord, PurchaseOrder, Room, Task, Tenant,
};

struct Table<E> {
    next_id: i64,
    rows: BTreeMap<i64, E>,
}

/// A [`Repository`] over a single in-memory table. Ids start at 1 and are
/// never reused.
pub struct MemoryRepository<E> {
    table: RwLock<Table<E>>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Table<E> {
    fn check_unique(
        &self,
        candidate: &E,
    ) -> Result<(), RepositoryError> {
        let Some(key) = candidate.unique_key() else {
            return Ok(());
        };
        let clash = self
            .rows
            .values()
            .any(|row| row.id() != candidate.id() && row.unique_key() == Some(key));
        if clash {
            return Err(RepositoryError::Conflict(format!(
                "{} '{}' already exists",
                E::KIND,
                key
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn list(
        &self,
        filter: ListFilter,
    ) -> Result<Vec<E>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|row| filter.admits(*row))
            .cloned()
            .collect())
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<E, RepositoryError> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    async fn create(
        &self,
        new: E::New,
        actor: &str,
    ) -> Result<E, RepositoryError> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        let entity = E::from_new(id, new, AuditInfo::created(actor, Utc::now()));
        table.check_unique(&entity)?;

        table.next_id += 1;
        table.rows.insert(id, entity.clone());
        debug!(kind = E::KIND, id, "created in memory");
        Ok(entity)
    }

    async fn update(
        &self,
        entity: &E,
    ) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&entity.id()) {
            return Err(RepositoryError::NotFound);
        }
        table.check_unique(entity)?;

        let mut stored = entity.clone();
        stored.audit_mut().updated_at = Utc::now();
        table.rows.insert(entity.id(), stored);
        Ok(())
    }
}

/// Every entity table held in memory.
#[derive(Default)]
pub struct MemoryStore {
    assets: MemoryRepository<Asset>,
    categories: MemoryRepository<Category>,
    rooms: MemoryRepository<Room>,
    employees: MemoryRepository<Employee>,
    maintenance: MemoryRepository<MaintenanceRecord>,
    purchase_orders: MemoryRepository<PurchaseOrder>,
    tenants: MemoryRepository<Tenant>,
    tasks: MemoryRepository<Task>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InventoryStore for MemoryStore {
    fn assets(&self) -> &dyn Repository<Asset> {
        &self.assets
    }

    fn categories(&self) -> &dyn Repository<Category> {
        &self.categories
    }

    fn rooms(&self) -> &dyn Repository<Room> {
        &self.rooms
    }

    fn employees(&self) -> &dyn Repository<Employee> {
        &self.employees
    }

    fn maintenance(&self) -> &dyn Repository<MaintenanceRecord> {
        &self.maintenance
    }

    fn purchase_orders(&self) -> &dyn Repository<PurchaseOrder> {
        &self.purchase_orders
    }

    fn tenants(&self) -> &dyn Repository<Tenant> {
        &self.tenants
    }

    fn tasks(&self) -> &dyn Repository<Task> {
        &self.tasks
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend. The connection string
/// is ignored.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn InventoryStore>, RepositoryError> {
        Ok(Box::new(MemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{AssetStatus, NewAsset, NewCategory};

    fn new_asset(tag: &str) -> NewAsset {
        NewAsset {
            tag: tag.to_string(),
            name: "Office chair".to_string(),
            description: None,
            serial_number: None,
            category_id: None,
            room_id: None,
            assigned_to: None,
            value: dec!(240),
            purchase_price: None,
            purchase_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            useful_life_years: Some(5),
            status: AssetStatus::InUse,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_audit() {
        let store = MemoryStore::new();

        let first = store.assets().create(new_asset("A-1"), "alice").await.unwrap();
        let second = store.assets().create(new_asset("A-2"), "alice").await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.audit.created_by, "alice");
        assert_eq!(first.audit.archived_at, None);
    }

    #[tokio::test]
    async fn duplicate_unique_key_is_a_conflict() {
        let store = MemoryStore::new();
        store.assets().create(new_asset("A-1"), "alice").await.unwrap();

        let result = store.assets().create(new_asset("A-1"), "alice").await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
        // The failed insert must not consume an id.
        let next = store.assets().create(new_asset("A-2"), "alice").await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn get_missing_record_is_not_found() {
        let store = MemoryStore::new();

        assert_eq!(
            store.rooms().get(42).await.unwrap_err(),
            RepositoryError::NotFound
        );
    }

    #[tokio::test]
    async fn update_replaces_whole_record() {
        let store = MemoryStore::new();
        let mut asset = store.assets().create(new_asset("A-1"), "alice").await.unwrap();

        asset.name = "Ergonomic chair".to_string();
        asset.room_id = Some(3);
        store.assets().update(&asset).await.unwrap();

        let fetched = store.assets().get(asset.id).await.unwrap();
        assert_eq!(fetched.name, "Ergonomic chair");
        assert_eq!(fetched.room_id, Some(3));
        assert!(fetched.audit.updated_at >= asset.audit.updated_at);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let mut asset = store.assets().create(new_asset("A-1"), "alice").await.unwrap();
        asset.id = 99;

        assert_eq!(
            store.assets().update(&asset).await,
            Err(RepositoryError::NotFound)
        );
    }

    #[tokio::test]
    async fn archived_records_are_hidden_from_active_lists() {
        let store = MemoryStore::new();
        let kept = store.assets().create(new_asset("A-1"), "alice").await.unwrap();
        let gone = store.assets().create(new_asset("A-2"), "alice").await.unwrap();

        let archived = store.assets().toggle_archived(gone.id, "bob").await.unwrap();
        assert_eq!(archived.status, AssetStatus::Archived);
        assert_eq!(archived.audit.archived_by.as_deref(), Some("bob"));

        let active = store.assets().list(ListFilter::ACTIVE).await.unwrap();
        assert_eq!(active.iter().map(|a| a.id).collect::<Vec<_>>(), vec![kept.id]);

        let all = store.assets().list(ListFilter::ALL).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_status() {
        let store = MemoryStore::new();
        let asset = store.assets().create(new_asset("A-1"), "alice").await.unwrap();

        store.assets().toggle_archived(asset.id, "bob").await.unwrap();
        let restored = store.assets().toggle_archived(asset.id, "bob").await.unwrap();

        assert_eq!(restored.status, AssetStatus::InUse);
        assert_eq!(restored.audit.archived_by, None);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_not_found() {
        let store = MemoryStore::new();

        assert_eq!(
            store.categories().toggle_archived(5, "bob").await.unwrap_err(),
            RepositoryError::NotFound
        );
    }

    #[tokio::test]
    async fn flag_entities_share_the_lifecycle() {
        let store = MemoryStore::new();
        let category = store
            .categories()
            .create(
                NewCategory {
                    name: "Electronics".to_string(),
                    description: None,
                    default_useful_life_years: Some(3),
                },
                "alice",
            )
            .await
            .unwrap();

        let archived = store.categories().toggle_archived(category.id, "alice").await.unwrap();

        assert!(archived.archived);
        assert!(store.categories().list(ListFilter::ACTIVE).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn factory_builds_empty_store() {
        let store = MemoryRepositoryFactory
            .create(&DbConfig::memory())
            .await
            .unwrap();

        assert!(store.tenants().list(ListFilter::ALL).await.unwrap().is_empty());
    }
}
