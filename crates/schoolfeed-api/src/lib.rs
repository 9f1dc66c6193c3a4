//! HTTP API for the school announcement feed.
//!
//! This crate exposes the data access layer over JSON REST endpoints:
//!
//! - **Auth** -- signup, login and logout with bearer-token sessions
//! - **Schools** -- discovery by city or free text, follow and unfollow
//! - **Posts** -- publishing (schools only), likes, saves and the home feed
//! - **Reference data** -- the state and city catalogue
//!
//! # Architecture
//!
//! Handlers share an [`AppState`] holding the [`Dal`](schoolfeed_core::Dal)
//! over the configured store and the [`SessionRegistry`](schoolfeed_core::SessionRegistry).
//! The session for a request is resolved by the [`auth`] extractors.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
