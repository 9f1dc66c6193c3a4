//! Document store layer for the school announcement feed.
//!
//! The data access layer talks to storage only through the
//! [`DocumentStore`] trait: keyed get, full-collection list, partial merge
//! and an atomic mutation batch. Two implementations are provided.
//!
//! # Architecture
//!
//! ```text
//! Data access layer
//!     |
//!     +-- DocumentStore ---> StoreBackend
//!                              |-- MemoryStore     (in-process, tests/dev)
//!                              +-- DragonflyStore  (shared, Lua-scripted batches)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`DocumentStore`] trait, collections and mutations
//! - [`memory`] -- In-memory implementation
//! - [`dragonfly`] -- `Dragonfly` (Redis-compatible) implementation
//! - [`backend`] -- Configuration-selected dispatch between the two
//! - [`codec`] -- Typed record <-> document conversion
//! - [`error`] -- Shared error types

pub mod backend;
pub mod codec;
pub mod dragonfly;
pub mod error;
pub mod memory;
pub mod store;

// Re-export primary types for convenience.
pub use backend::StoreBackend;
pub use codec::{from_document, to_document};
pub use dragonfly::DragonflyStore;
pub use error::DbError;
pub use memory::MemoryStore;
pub use store::{Collection, Document, DocumentStore, Mutation};
