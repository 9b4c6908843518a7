//! Bulk import of asset registers from CSV.

mod loader;

pub use loader::{AssetLoader, AssetLoaderError, AssetRecord, LoadSummary};
