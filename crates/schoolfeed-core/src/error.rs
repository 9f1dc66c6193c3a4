//! Error types for the data access layer.
//!
//! [`DalError`] is the small closed set of failures callers map to
//! user-facing messages. Absence is not an error: lookups return `None`.

use schoolfeed_db::DbError;

/// Errors returned by [`Dal`](crate::Dal) operations.
#[derive(Debug, thiserror::Error)]
pub enum DalError {
    /// A record the caller depends on does not exist.
    ///
    /// No DAL operation returns this; lookups report absence as `None`.
    /// It completes the error set for layers that treat absence as a
    /// failure, such as the HTTP API's 404 mapping.
    #[error("not found: {0}")]
    NotFound(String),

    /// Authentication failed. Deliberately does not say whether the email or
    /// the password was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Signup with an email that already belongs to an account.
    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// The underlying store failed. Never retried.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: DbError,
    },
}
