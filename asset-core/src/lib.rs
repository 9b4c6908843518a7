pub mod calculations;
pub mod db;
pub mod drafts;
pub mod lifecycle;
pub mod models;
pub mod reports;
pub mod services;

pub use calculations::{DepreciationPolicy, DepreciationSnapshot};
pub use db::repository::{InventoryStore, Repository, RepositoryError};
pub use lifecycle::{Archivable, toggle_archived};
pub use models::*;
