//! Error types for cache operations

use thiserror::Error;

/// Main error type for repository and backend operations
///
/// These never cross the [`CacheRepository`](crate::CacheRepository)
/// boundary: repositories log and record them, then degrade to a miss.
#[derive(Error, Debug, Clone)]
pub enum CacheError {
    /// Serialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// Backend connection failed
    #[error("connection error: {0}")]
    Connection(String),

    /// Backend operation failed
    #[error("backend error: {0}")]
    Backend(String),

    /// The backend handle was already released
    #[error("backend closed")]
    Closed,

    /// Timeout
    #[error("operation timed out")]
    Timeout,
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
