//! Shared application state for the feed API.
//!
//! [`AppState`] holds the data access layer over the configured store and
//! the table of open sessions. Handlers receive it as `State<Arc<AppState>>`.

use schoolfeed_core::{Dal, SessionRegistry};
use schoolfeed_db::{MemoryStore, StoreBackend};

/// State shared by every request handler.
pub struct AppState {
    /// Data access layer over the configured document store.
    pub dal: Dal<StoreBackend>,
    /// Open sessions keyed by bearer token.
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Create state over `store` with no open sessions.
    pub fn new(store: impl Into<StoreBackend>) -> Self {
        Self {
            dal: Dal::new(store.into()),
            sessions: SessionRegistry::new(),
        }
    }

    /// Create state over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Name of the active store backend.
    pub const fn backend_name(&self) -> &'static str {
        self.dal.store().name()
    }
}
