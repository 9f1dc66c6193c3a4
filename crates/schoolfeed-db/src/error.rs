//! Error types for the store layer.
//!
//! All errors are propagated via [`DbError`] which wraps the underlying
//! [`fred`] and [`serde_json`] errors with additional context about which
//! operation failed.

/// Errors that can occur in the store layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `Dragonfly`/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A store round-trip did not complete within the configured timeout.
    #[error("Store timeout: {0}")]
    Timeout(String),

    /// A stored value or a value headed for the store is not a JSON object.
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
