use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::lifecycle::{self, Archivable};
use crate::models::{
    Asset, AuditInfo, Category, Employee, MaintenanceRecord, PurchaseOrder, Room, Task, Tenant,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Which records a list call returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub include_archived: bool,
}

impl ListFilter {
    /// Only records that are not archived.
    pub const ACTIVE: Self = Self {
        include_archived: false,
    };

    /// Every record, archived or not.
    pub const ALL: Self = Self {
        include_archived: true,
    };

    pub fn admits<T: Archivable>(
        &self,
        item: &T,
    ) -> bool {
        self.include_archived || !item.is_archived()
    }
}

/// A record type stored by a [`Repository`].
pub trait Entity: Archivable + Clone + Send + Sync + 'static {
    /// Insert payload: the record without id or audit stamps.
    type New: Clone + Send + Sync + 'static;

    /// Human-readable entity name used in logs and messages.
    const KIND: &'static str;

    fn id(&self) -> i64;

    /// Value that must be unique across all records of this type, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    /// Assembles the stored record once the backend has assigned an id.
    fn from_new(
        id: i64,
        new: Self::New,
        audit: AuditInfo,
    ) -> Self;
}

/// CRUD contract for one entity type.
///
/// Updates replace the whole record keyed by id; the last write wins.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn list(
        &self,
        filter: ListFilter,
    ) -> Result<Vec<E>, RepositoryError>;

    async fn get(
        &self,
        id: i64,
    ) -> Result<E, RepositoryError>;

    async fn create(
        &self,
        new: E::New,
        actor: &str,
    ) -> Result<E, RepositoryError>;

    async fn update(
        &self,
        entity: &E,
    ) -> Result<(), RepositoryError>;

    /// Archives an active record or restores an archived one.
    async fn toggle_archived(
        &self,
        id: i64,
        actor: &str,
    ) -> Result<E, RepositoryError> {
        let entity = self.get(id).await?;
        let toggled = lifecycle::toggle_archived(entity, actor, Utc::now());
        self.update(&toggled).await?;
        info!(
            kind = E::KIND,
            id,
            archived = toggled.is_archived(),
            actor,
            "lifecycle toggled"
        );
        self.get(id).await
    }
}

/// One repository per entity type, backed by a single storage backend.
pub trait InventoryStore: Send + Sync {
    fn assets(&self) -> &dyn Repository<Asset>;
    fn categories(&self) -> &dyn Repository<Category>;
    fn rooms(&self) -> &dyn Repository<Room>;
    fn employees(&self) -> &dyn Repository<Employee>;
    fn maintenance(&self) -> &dyn Repository<MaintenanceRecord>;
    fn purchase_orders(&self) -> &dyn Repository<PurchaseOrder>;
    fn tenants(&self) -> &dyn Repository<Tenant>;
    fn tasks(&self) -> &dyn Repository<Task>;
}
