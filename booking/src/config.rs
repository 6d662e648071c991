//! Configuration management for the seat booking binary.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The grid itself is fixed and not configurable.

use crate::error::ConfigError;
use crate::store::{FileStore, InMemoryStore, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "seatwise_booking=info,seatwise_runtime=warn";

/// Default bookings document
pub const DEFAULT_STORAGE_PATH: &str = "seat-bookings.json";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where bookings are persisted
    pub storage: StorageConfig,
    /// Logging configuration
    pub log: LogConfig,
    /// Store runtime configuration
    pub runtime: RuntimeConfig,
}

/// Persistence backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local JSON document
    File,
    /// Process memory; nothing survives the session
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::UnknownBackend(raw.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend kind (`SEATWISE_STORAGE_BACKEND`)
    pub backend: StorageBackend,
    /// Document path for the file backend (`SEATWISE_STORAGE_PATH`)
    pub path: PathBuf,
}

impl StorageConfig {
    /// Open the configured backend
    #[must_use]
    pub fn open(&self) -> Arc<dyn KeyValueStore> {
        match self.backend {
            StorageBackend::File => Arc::new(FileStore::new(&self.path)),
            StorageBackend::Memory => Arc::new(InMemoryStore::new()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directives (`SEATWISE_LOG`, then `RUST_LOG`)
    pub filter: String,
}

/// Store runtime configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Feedback loop bound (`SEATWISE_MAX_ACTIONS_PER_SEND`)
    pub max_actions_per_send: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownBackend`] when `SEATWISE_STORAGE_BACKEND` names
    /// no known backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable numbers fall back to their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownBackend`] when `SEATWISE_STORAGE_BACKEND` names
    /// no known backend.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = lookup("SEATWISE_STORAGE_BACKEND")
            .map(|raw| raw.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or(StorageBackend::File);

        Ok(Self {
            storage: StorageConfig {
                backend,
                path: lookup("SEATWISE_STORAGE_PATH")
                    .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from),
            },
            log: LogConfig {
                filter: lookup("SEATWISE_LOG")
                    .or_else(|| lookup("RUST_LOG"))
                    .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            },
            runtime: RuntimeConfig {
                max_actions_per_send: lookup("SEATWISE_MAX_ACTIONS_PER_SEND")
                    .and_then(|s| s.parse::<usize>().ok())
                    .filter(|limit| *limit > 0)
                    .unwrap_or(64),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() -> Result<(), ConfigError> {
        let config = Config::from_lookup(|_| None)?;

        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.path, PathBuf::from("seat-bookings.json"));
        assert_eq!(config.log.filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.runtime.max_actions_per_send, 64);
        Ok(())
    }

    #[test]
    fn test_overrides() -> Result<(), ConfigError> {
        let config = Config::from_lookup(lookup_from(&[
            ("SEATWISE_STORAGE_BACKEND", "Memory"),
            ("SEATWISE_STORAGE_PATH", "/tmp/seats.json"),
            ("RUST_LOG", "debug"),
            ("SEATWISE_MAX_ACTIONS_PER_SEND", "16"),
        ]))?;

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/seats.json"));
        assert_eq!(config.log.filter, "debug");
        assert_eq!(config.runtime.max_actions_per_send, 16);
        Ok(())
    }

    #[test]
    fn test_seatwise_log_wins_over_rust_log() -> Result<(), ConfigError> {
        let config = Config::from_lookup(lookup_from(&[
            ("SEATWISE_LOG", "seatwise_booking=trace"),
            ("RUST_LOG", "warn"),
        ]))?;

        assert_eq!(config.log.filter, "seatwise_booking=trace");
        Ok(())
    }

    #[test]
    fn test_bad_numbers_fall_back() -> Result<(), ConfigError> {
        for raw in ["zero", "0", "-3"] {
            let config =
                Config::from_lookup(lookup_from(&[("SEATWISE_MAX_ACTIONS_PER_SEND", raw)]))?;
            assert_eq!(config.runtime.max_actions_per_send, 64);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_backend() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[("SEATWISE_STORAGE_BACKEND", "redis")])),
            Err(ConfigError::UnknownBackend("redis".to_string()))
        );
    }

    #[test]
    fn test_memory_backend_opens_empty() -> Result<(), crate::error::PersistenceError> {
        let storage = StorageConfig {
            backend: StorageBackend::Memory,
            path: PathBuf::from(DEFAULT_STORAGE_PATH),
        };

        let backend = storage.open();

        assert_eq!(backend.get("anything")?, None);
        Ok(())
    }

    #[test]
    fn test_file_backend_uses_path() -> Result<(), crate::error::PersistenceError> {
        let dir = tempfile::tempdir()?;
        let storage = StorageConfig {
            backend: StorageBackend::File,
            path: dir.path().join("bookings.json"),
        };

        storage.open().set("key", "value")?;

        assert!(storage.path.exists());
        assert_eq!(storage.open().get("key")?, Some("value".to_string()));
        Ok(())
    }
}
