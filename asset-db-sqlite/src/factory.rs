use std::path::PathBuf;

use asset_core::db::{DbConfig, InventoryStore, RepositoryError, RepositoryFactory};
use async_trait::async_trait;

use crate::repository::SqliteStore;

/// Resolve the seeds directory at runtime so it works in both development and
/// packaged distribution.
///
/// Resolution order:
/// 1. **`ASSET_DB_SQLITE_SEEDS_DIR`** if set.
/// 2. **`./seeds`** if the directory exists in the current working directory.
/// 3. **Crate manifest dir** `$CARGO_MANIFEST_DIR/seeds` as last resort.
fn seeds_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ASSET_DB_SQLITE_SEEDS_DIR") {
        return PathBuf::from(dir);
    }
    let cwd_seeds = PathBuf::from("./seeds");
    if cwd_seeds.is_dir() {
        return cwd_seeds;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("seeds")
}

/// Turns a configured connection string into a sqlx SQLite url.
///
/// * `":memory:"` becomes an ephemeral in-memory database.
/// * Values already starting with `sqlite:` pass through unchanged.
/// * Anything else is a file path, created if it does not exist.
pub fn database_url(connection_string: &str) -> String {
    let trimmed = connection_string.trim();
    if trimmed == ":memory:" {
        "sqlite::memory:".to_string()
    } else if trimmed.starts_with("sqlite:") {
        trimmed.to_string()
    } else {
        format!("sqlite://{}", trimmed)
    }
}

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`asset_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use asset_core::db::RepositoryRegistry;
/// use asset_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens the database, applies migrations, then applies the seed files
    /// (default categories). Seeds are idempotent.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn InventoryStore>, RepositoryError> {
        let store = SqliteStore::new(&database_url(&config.connection_string))
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        store
            .run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        store
            .run_seeds(&seeds_dir())
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        Ok(Box::new(store))
    }
}
