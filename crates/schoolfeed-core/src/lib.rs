//! Data access layer for the school announcement feed.
//!
//! [`Dal`] is the only component that talks to the document store. It
//! exposes account, post, follow, like and save operations, keeps the
//! denormalized counters (`followersCount`, `postsCount`, `likes`) in step
//! with the records they summarize, and returns posts in feed order.
//!
//! # Modules
//!
//! - [`dal`] -- The [`Dal`] handle and shared relationship helpers
//! - `accounts` -- Signup, lookup, authentication, profile edits, discovery
//! - `posts` -- Post creation and feed listings
//! - `follows` -- Follow relationships and follower counters
//! - `reactions` -- Likes and saves
//! - [`ordering`] -- Emergency-first, newest-first ordering and filters
//! - [`session`] -- Bearer-token sessions
//! - [`config`] -- `schoolfeed-config.yaml` loading
//! - [`error`] -- [`DalError`]

mod accounts;
pub mod config;
pub mod dal;
pub mod error;
mod follows;
pub mod ordering;
mod posts;
mod reactions;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, FeedConfig, StoreKind};
pub use dal::Dal;
pub use error::DalError;
pub use posts::PostView;
pub use session::{Session, SessionRegistry};
