use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use asset_core::DepreciationPolicy;
use asset_core::db::DbConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "asset-ledger.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML from config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Settings read from `asset-ledger.toml`. Every key is optional.
///
/// ```toml
/// log_level = "info"
/// log_file = "asset-ledger.log"
/// actor = "admin"
///
/// [database]
/// backend = "sqlite"
/// connection_string = "assets.db"
///
/// [depreciation]
/// default_useful_life_years = 5
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Log records are appended here as well as written to stderr.
    pub log_file: Option<PathBuf>,
    /// Name stamped on every record this process creates or changes.
    pub actor: String,
    pub database: DbConfig,
    pub depreciation: DepreciationPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            actor: "admin".to_string(),
            database: DbConfig::default(),
            depreciation: DepreciationPolicy::default(),
        }
    }
}

/// Values given on the command line; each one beats the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub backend: Option<String>,
    pub db: Option<String>,
    pub actor: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn from_toml(
        contents: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn apply(
        mut self,
        overrides: Overrides,
    ) -> Self {
        if let Some(backend) = overrides.backend {
            self.database.backend = backend;
        }
        if let Some(db) = overrides.db {
            self.database.connection_string = db;
        }
        if let Some(actor) = overrides.actor {
            self.actor = actor;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        self
    }
}

/// Reads the config file at `path`. A file that does not exist yields the
/// defaults; one that exists but cannot be read or parsed is an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    match fs::read_to_string(path_ref) {
        Ok(contents) => AppConfig::from_toml(&contents, path_ref),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No configuration at {:?}; using defaults", path_ref);
            Ok(AppConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path_ref.to_path_buf(),
            source,
        }),
    }
}
