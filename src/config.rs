//! Configuration file handling for database connections.
//!
//! This module provides loading and parsing of `.data_access.json`
//! configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::{DatabaseConfig, DbError, PostgresConfig};

/// Name of the config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".data_access.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Database configuration
    pub database: DatabaseConfigFile,
}

/// Database configuration variants.
///
/// JSON format uses a "type" field with lowercase variant names:
///
/// ```json
/// { "database": { "type": "postgres", "connection_string": "postgres://localhost/app" } }
/// { "database": { "type": "postgres", "host": "localhost", "user": "app", "database": "app" } }
/// { "database": { "type": "stub", "registry": "./fixtures/registry.json" } }
/// { "database": { "type": "memory" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfigFile {
    /// PostgreSQL server
    Postgres(PostgresConfig),
    /// Stub provider backed by a registry file
    Stub {
        #[serde(default)]
        registry: Option<PathBuf>,
    },
    /// Stub provider with no entries
    #[serde(rename = "memory")]
    Mem,
}

impl ConfigFile {
    /// Load configuration from `.data_access.json` in the current directory.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not
    /// valid configuration JSON.
    pub fn load_if_present() -> Result<Option<Self>, DbError> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, DbError> {
        let content = fs::read_to_string(path).map_err(|e| DbError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        serde_json::from_str(&content).map_err(|e| DbError::Config {
            message: format!("Invalid JSON in {}: {}", path.display(), e),
        })
    }
}

impl DatabaseConfigFile {
    /// Convert this configuration to a DatabaseConfig.
    pub fn to_database_config(&self) -> DatabaseConfig {
        match self {
            Self::Postgres(pg) => DatabaseConfig::Postgres(pg.clone()),
            Self::Stub { registry } => DatabaseConfig::Stub {
                registry: registry.clone(),
            },
            Self::Mem => DatabaseConfig::Stub { registry: None },
        }
    }
}
