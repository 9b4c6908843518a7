use std::marker::PhantomData;
use std::path::Path;

use anyhow::{Context, Result};
use asset_core::db::{Entity, InventoryStore, ListFilter, Repository};
use asset_core::{
    Asset, AuditInfo, Category, Employee, MaintenanceRecord, PurchaseOrder, RepositoryError, Room,
    Task, Tenant,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, warn};

use crate::table::{AUDIT_COLUMNS, SqliteEntity, audit_values};

/// Maps a failed write to a repository error, reporting UNIQUE violations
/// as conflicts.
fn write_error<E: Entity>(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(format!("{} already exists: {}", E::KIND, db.message()))
        }
        _ => RepositoryError::Database(err.to_string()),
    }
}

fn select_sql<E: SqliteEntity>() -> String {
    format!(
        "SELECT id, {}, {} FROM {}",
        E::COLUMNS.join(", "),
        AUDIT_COLUMNS.join(", "),
        E::TABLE
    )
}

/// [`Repository`] over one table of a shared pool.
pub struct SqliteRepository<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: SqliteEntity> SqliteRepository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: SqliteEntity> Repository<E> for SqliteRepository<E> {
    async fn list(
        &self,
        filter: ListFilter,
    ) -> Result<Vec<E>, RepositoryError> {
        let sql = if filter.include_archived {
            format!("{} ORDER BY id", select_sql::<E>())
        } else {
            format!("{} WHERE {} ORDER BY id", select_sql::<E>(), E::ACTIVE_FILTER)
        };

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(E::from_row).collect()
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<E, RepositoryError> {
        let sql = format!("{} WHERE id = ?", select_sql::<E>());
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        E::from_row(&row)
    }

    async fn create(
        &self,
        new: E::New,
        actor: &str,
    ) -> Result<E, RepositoryError> {
        // The id is a placeholder; SQLite assigns the real one.
        let draft = E::from_new(0, new, AuditInfo::created(actor, Utc::now()));

        let columns: Vec<&str> = E::COLUMNS.iter().chain(AUDIT_COLUMNS.iter()).copied().collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        );

        let mut query = sqlx::query(&sql);
        for value in draft.values().into_iter().chain(audit_values(draft.audit())) {
            query = value.bind_to(query);
        }
        let result = query.execute(&self.pool).await.map_err(write_error::<E>)?;

        let id = result.last_insert_rowid();
        debug!(kind = E::KIND, id, "inserted");
        self.get(id).await
    }

    async fn update(
        &self,
        entity: &E,
    ) -> Result<(), RepositoryError> {
        let assignments: Vec<String> = E::COLUMNS
            .iter()
            .chain(["updated_at", "archived_at", "archived_by"].iter())
            .map(|column| format!("{column} = ?"))
            .collect();
        let sql = format!("UPDATE {} SET {} WHERE id = ?", E::TABLE, assignments.join(", "));

        let audit = entity.audit();
        let mut query = sqlx::query(&sql);
        for value in entity.values() {
            query = value.bind_to(query);
        }
        let result = query
            .bind(Utc::now())
            .bind(audit.archived_at)
            .bind(audit.archived_by.clone())
            .bind(entity.id())
            .execute(&self.pool)
            .await
            .map_err(write_error::<E>)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        debug!(kind = E::KIND, id = entity.id(), "updated");
        Ok(())
    }
}

/// Every inventory table in one SQLite database.
pub struct SqliteStore {
    pool: SqlitePool,
    assets: SqliteRepository<Asset>,
    categories: SqliteRepository<Category>,
    rooms: SqliteRepository<Room>,
    employees: SqliteRepository<Employee>,
    maintenance: SqliteRepository<MaintenanceRecord>,
    purchase_orders: SqliteRepository<PurchaseOrder>,
    tenants: SqliteRepository<Tenant>,
    tasks: SqliteRepository<Task>,
}

/// An in-memory database lives only as long as its one connection, so that
/// connection is never closed for idleness or age.
fn pool_options(database_url: &str) -> SqlitePoolOptions {
    let options = SqlitePoolOptions::new();
    if database_url.contains(":memory:") {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        options
    }
}

impl SqliteStore {
    /// Opens `database_url` (`sqlite:` form), creating the file if needed.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options: SqliteConnectOptions = database_url
            .parse()
            .with_context(|| format!("Invalid database url: {}", database_url))?;

        let pool = pool_options(database_url)
            .connect_with(options.create_if_missing(true))
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self::new_with_pool(pool))
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self {
            assets: SqliteRepository::new(pool.clone()),
            categories: SqliteRepository::new(pool.clone()),
            rooms: SqliteRepository::new(pool.clone()),
            employees: SqliteRepository::new(pool.clone()),
            maintenance: SqliteRepository::new(pool.clone()),
            purchase_orders: SqliteRepository::new(pool.clone()),
            tenants: SqliteRepository::new(pool.clone()),
            tasks: SqliteRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Load and execute all SQL seed files from the specified directory.
    /// Files are executed in alphabetical order by filename. A missing
    /// directory is skipped.
    pub async fn run_seeds(
        &self,
        seeds_dir: &Path,
    ) -> Result<()> {
        if !seeds_dir.is_dir() {
            warn!(dir = %seeds_dir.display(), "seeds directory not found, skipping");
            return Ok(());
        }

        let mut entries: Vec<_> = std::fs::read_dir(seeds_dir)
            .with_context(|| format!("Failed to read seeds directory '{}'", seeds_dir.display()))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "sql"))
            .collect();

        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read seed file '{}'", path.display()))?;

            sqlx::raw_sql(&sql)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to execute seed file '{}'", path.display()))?;
            info!(file = %path.display(), "seed applied");
        }

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl InventoryStore for SqliteStore {
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
