pub mod decimal;
pub mod factory;
pub mod repository;
pub mod table;

pub use factory::SqliteRepositoryFactory;
pub use repository::{SqliteRepository, SqliteStore};
pub use table::{SqlValue, SqliteEntity};
