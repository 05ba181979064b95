//! Error types shared across Circle crates.
//!
//! Load and config errors are fatal: nothing is served over a dataset
//! that failed to load. Query errors are local to the query that raised
//! them and leave every store and graph untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A name or id did not resolve to any entity.
    #[error("not found: {0}")]
    NotFound(String),

    /// A query argument was rejected before any work was done.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Failure while building the record store from a dataset.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("dataset exceeds capacity of {capacity} entities")]
    CapacityExceeded { capacity: usize },
}

/// Failure while reading or writing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
