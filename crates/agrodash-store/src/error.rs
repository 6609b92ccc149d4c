//! Error types for agrodash-store.

use std::path::PathBuf;

/// Result type for agrodash-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in agrodash-store.
///
/// Both variants carry the underlying `rusqlite` cause so callers can
/// surface it; the gateway never swallows a failed fetch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to open a read-only connection to the database.
    #[error("Failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    /// A query failed after the connection was established. Covers busy
    /// timeouts as well as SQL-level failures.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
