//! Error types for fastlru

use thiserror::Error;

/// Result type alias for cache lookups
pub type Result<T> = std::result::Result<T, Error>;

/// Lookup failures reported by the cache
///
/// Only `get` can fail. Inserts, clears and snapshots are total.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Lookup issued while the cache holds no entries
    #[error("cache is empty")]
    EmptyCache,

    /// Lookup key is not present in a non-empty cache
    #[error("key not found")]
    KeyNotFound,
}
