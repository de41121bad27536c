//! Error types for the cache store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Outcome of a failed typed read.
///
/// Writes and invalidations never fail; only `get` and `get_stale` report
/// errors, and neither variant leaves the store in a different state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key absent, expired (for `get`), or the store is disabled
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Stored value is not of the requested type
    #[error("Type mismatch for key {key}: expected {expected}")]
    TypeMismatch {
        /// The key that was read
        key: String,
        /// Name of the type the caller asked for
        expected: &'static str,
    },
}

impl CacheError {
    // == Is Not Found ==
    /// Returns true for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache store.
pub type Result<T> = std::result::Result<T, CacheError>;
