pub mod entity;
pub mod factory;
pub mod memory;
pub mod repository;

pub use factory::{DbConfig, RepositoryFactory, RepositoryRegistry};
pub use memory::{MemoryRepository, MemoryRepositoryFactory, MemoryStore};
pub use repository::{Entity, InventoryStore, ListFilter, Repository, RepositoryError};
