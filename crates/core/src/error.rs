//! Error types for Stowage.

use thiserror::Error;

/// Result type alias for Stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur before or around a packing run.
///
/// Items that cannot be loaded are never errors; they are reported in the
/// unplaced section of the result.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item definition provided.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Invalid container specification provided.
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Computation cancelled.
    #[error("Computation cancelled")]
    Cancelled,

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
