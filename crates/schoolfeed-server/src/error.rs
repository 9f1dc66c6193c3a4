//! Error types for the server binary.
//!
//! [`StartupError`] wraps every failure mode between process start and a
//! clean shutdown so `main` can propagate with `?`.

/// Top-level error for the server binary.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: schoolfeed_core::ConfigError,
    },

    /// The document store could not be reached.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: schoolfeed_db::DbError,
    },

    /// The HTTP server failed to start or stopped with an error.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: schoolfeed_api::ServerError,
    },
}
