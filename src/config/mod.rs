//! Application configuration
//!
//! Loaded from YAML, every key optional:
//!
//! ```yaml
//! server:
//!   bind_addr: "0.0.0.0:3000"
//!   event_bus_capacity: 1024
//!   cors_permissive: false
//! storage:
//!   backend: mongodb            # in_memory | mongodb
//!   uri: "mongodb://localhost:27017"
//!   database: invoice_desk
//!   collection: invoices
//! logging:
//!   filter: "info,invoice_desk=debug"
//! seed_sample_data: false
//! ```
//!
//! # Environment variables
//!
//! Applied on top of the file by [`AppConfig::apply_env_overrides`]:
//!
//! | Variable | Key |
//! |----------|-----|
//! | INVOICE_BIND_ADDR | server.bind_addr |
//! | INVOICE_STORAGE | storage.backend |
//! | MONGODB_URI | storage.uri |
//! | MONGODB_DATABASE | storage.database |
//! | MONGODB_COLLECTION | storage.collection |
//! | INVOICE_LOG | logging.filter |

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    /// Insert the sample invoices on startup when the store is empty
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Mutation events are published only when this is non-zero
    pub event_bus_capacity: usize,
    /// Allow cross-origin requests from any origin
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            event_bus_capacity: 1024,
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::InMemory => f.write_str("in_memory"),
            StorageBackend::Mongodb => f.write_str("mongodb"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "in-memory" | "memory" => Ok(StorageBackend::InMemory),
            "mongodb" | "mongo" => Ok(StorageBackend::Mongodb),
            other => Err(anyhow!(
                "unknown storage backend '{}' (expected in_memory or mongodb)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            uri: "mongodb://localhost:27017".to_string(),
            database: "invoice_desk".to_string(),
            collection: "invoices".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    ///
    /// Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(addr) = var("INVOICE_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(backend) = var("INVOICE_STORAGE") {
            self.storage.backend = backend.parse()?;
        }
        if let Some(uri) = var("MONGODB_URI") {
            self.storage.uri = uri;
        }
        if let Some(database) = var("MONGODB_DATABASE") {
            self.storage.database = database;
        }
        if let Some(collection) = var("MONGODB_COLLECTION") {
            self.storage.collection = collection;
        }
        if let Some(filter) = var("INVOICE_LOG") {
            self.logging.filter = filter;
        }
        Ok(())
    }
}
