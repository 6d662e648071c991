//! Error types for the booking engine.
//!
//! Policy rejections are not errors; see [`crate::policy::Rejection`]. The
//! types here cover caller contract violations, persistence failures and
//! configuration problems.

use thiserror::Error;

/// Caller contract violations against the fixed grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Row or column outside the grid
    #[error("seat ({row}, {column}) is outside the seat grid")]
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        column: usize,
    },

    /// Row index with no price tier
    #[error("row {0} has no price tier")]
    InvalidRow(usize),

    /// Seat label that is not a row letter followed by a seat number
    #[error("'{0}' is not a seat label (expected e.g. A1 or H10)")]
    InvalidLabel(String),
}

/// Failures reading or writing persisted bookings.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Stored value is not a JSON array of seat ID strings
    #[error("persisted bookings are corrupt: {0}")]
    CorruptData(String),

    /// Backend I/O failure
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Backend document could not be encoded or decoded
    #[error("storage document is malformed: {0}")]
    Format(#[from] serde_json::Error),

    /// Backend refused the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `SEATWISE_STORAGE_BACKEND` names no known backend
    #[error("unknown storage backend '{0}' (expected 'file' or 'memory')")]
    UnknownBackend(String),
}
