//! Persistence of confirmed bookings.
//!
//! Only the set of Booked seat identifiers survives a session. It is stored
//! under a single key as a JSON array of `"<row>-<column>"` strings, through
//! a pluggable [`KeyValueStore`] backend:
//! - [`InMemoryStore`]: `HashMap` storage for tests and throwaway sessions
//! - [`FileStore`]: one local JSON document mapping keys to string values

use crate::error::PersistenceError;
use crate::grid::Grid;
use crate::types::SeatId;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Key under which booked seat identifiers are persisted
///
/// Unchanged from earlier releases so existing data keeps loading.
pub const STORAGE_KEY: &str = "greenstitch-seat-bookings-v1";

/// String key-value storage
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, `None` when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Remove `key`; removing an absent key succeeds
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

// ============================================================================
// In-memory backend
// ============================================================================

/// `HashMap` backend
///
/// Writes can be made to fail with [`InMemoryStore::fail_writes`], which lets
/// tests observe how callers handle an unavailable backend.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<HashMap<String, String>>,
    failing_writes: AtomicBool,
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle write-failure mode; reads keep working
    pub fn fail_writes(&self, failing: bool) {
        self.failing_writes.store(failing, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable(
                "in-memory store is rejecting writes".to_string(),
            ));
        }
        Ok(())
    }
}

fn poisoned<T>(_: T) -> PersistenceError {
    PersistenceError::Unavailable("in-memory store lock poisoned".to_string())
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.data.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.data
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.data.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

// ============================================================================
// File backend
// ============================================================================

/// Local JSON file backend
///
/// The file holds one JSON object of string values. A missing or empty file
/// reads as an empty object. Writes go to a sibling temporary file that is
/// then renamed over the original.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Backend over the document at `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(&self) -> Result<HashMap<String, String>, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(error) => return Err(error.into()),
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_document(&self, document: &HashMap<String, String>) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string_pretty(document)?;
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, encoded)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value.to_string());
        self.write_document(&document)
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut document = self.read_document()?;
        if document.remove(key).is_none() {
            return Ok(());
        }
        self.write_document(&document)
    }
}

// ============================================================================
// Booking store
// ============================================================================

/// Reads and writes the booked-seat set through a backend
#[derive(Clone)]
pub struct BookingStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for BookingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookingStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl BookingStore {
    /// Store using [`STORAGE_KEY`]
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    /// Store using a custom key
    #[must_use]
    pub fn with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Key the bookings are stored under
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// JSON array of the grid's Booked seat identifiers, row-major
    #[must_use]
    pub fn serialize(grid: &Grid) -> String {
        serde_json::Value::Array(
            grid.booked_ids()
                .into_iter()
                .map(|id| serde_json::Value::String(id.into_string()))
                .collect(),
        )
        .to_string()
    }

    /// Parses a persisted payload
    ///
    /// # Errors
    ///
    /// [`PersistenceError::CorruptData`] unless `raw` is a JSON array of strings.
    pub fn deserialize(raw: &str) -> Result<BTreeSet<SeatId>, PersistenceError> {
        let ids: Vec<String> = serde_json::from_str(raw)
            .map_err(|error| PersistenceError::CorruptData(error.to_string()))?;
        Ok(ids.into_iter().map(SeatId::from).collect())
    }

    /// Persisted booked identifiers
    ///
    /// An absent key, a corrupt value and a failed read all yield the empty
    /// set; the last two are logged.
    #[must_use]
    pub fn load(&self) -> BTreeSet<SeatId> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeSet::new(),
            Err(error) => {
                tracing::warn!(key = %self.key, error = %error, "Failed to read persisted bookings");
                return BTreeSet::new();
            },
        };

        Self::deserialize(&raw).unwrap_or_else(|error| {
            tracing::warn!(key = %self.key, error = %error, "Ignoring corrupt persisted bookings");
            BTreeSet::new()
        })
    }

    /// Writes a payload produced by [`BookingStore::serialize`]
    ///
    /// # Errors
    ///
    /// Returns the backend error; the caller decides how to report it.
    pub fn save(&self, payload: &str) -> Result<(), PersistenceError> {
        self.backend.set(&self.key, payload)
    }

    /// Erases the persisted bookings
    ///
    /// # Errors
    ///
    /// Returns the backend error; the caller decides how to report it.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.backend.remove(&self.key)
    }
}
