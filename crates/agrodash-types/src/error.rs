//! Error types for row parsing in agrodash-types.

use thiserror::Error;

/// Errors that can occur when parsing raw database values.
///
/// These cover malformed rows only; connection and query errors belong
/// to the store crate.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error
/// variants in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The timestamp text could not be parsed in any supported format.
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// The date text could not be parsed in any supported format.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
}

/// Result type alias using agrodash-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
