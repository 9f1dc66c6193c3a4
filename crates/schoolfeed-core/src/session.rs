//! Signed-in sessions.
//!
//! A [`Session`] is an immutable snapshot of the authenticated account.
//! Handlers receive it by value and cannot change it; only the auth
//! operations go through [`SessionRegistry`] to open, refresh or close one.
//! Each client holds one bearer token, so a client has at most one current
//! account.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use schoolfeed_types::{Account, AccountId};
use tokio::sync::RwLock;
use uuid::Uuid;

/// The authenticated account for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token identifying the session.
    pub token: Uuid,
    /// The account as of sign-in or its last profile update.
    pub account: Account,
    /// When the session was opened.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// The signed-in account's identifier.
    pub const fn account_id(&self) -> AccountId {
        self.account.id
    }
}

/// Process-wide table of open sessions, keyed by bearer token.
///
/// Cloning shares the same table.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `account` under a fresh random token.
    pub async fn open(&self, account: Account) -> Session {
        let session = Session {
            token: Uuid::new_v4(),
            account,
            started_at: Utc::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session.token, session.clone());
        tracing::debug!(account_id = %session.account.id, "Session opened");
        session
    }

    /// The session for `token`, if it is open.
    pub async fn get(&self, token: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&token).cloned()
    }

    /// Replace the account snapshot of an open session, keeping its start
    /// time. Returns the updated session, or `None` if `token` is not open.
    pub async fn refresh(&self, token: Uuid, account: Account) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&token)?;
        session.account = account;
        Some(session.clone())
    }

    /// Close the session for `token`. Returns `false` if it was not open.
    pub async fn close(&self, token: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&token);
        if let Some(session) = &removed {
            tracing::debug!(account_id = %session.account.id, "Session closed");
        }
        removed.is_some()
    }

    /// Number of open sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no session is open.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
