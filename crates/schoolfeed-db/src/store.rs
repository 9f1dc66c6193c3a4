//! The document store boundary.
//!
//! Every record lives in one of five flat collections, keyed by a UUID v7
//! string. The store offers keyed reads, full-collection listing, partial
//! merges and an atomic mutation batch. It enforces no foreign keys and no
//! uniqueness; those rules belong to the data access layer.
//!
//! # Atomic batches
//!
//! [`DocumentStore::commit`] applies a list of [`Mutation`]s as one
//! indivisible unit. A relationship write and the counter adjustment it
//! implies travel in the same batch, so concurrent writers can neither lose
//! an increment nor decrement twice for one removed record.

use std::future::Future;

use crate::error::DbError;

/// A stored record: a flat JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A top-level collection of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Collection {
    /// School and user accounts.
    Users,
    /// School announcements.
    Posts,
    /// Follow relationships.
    Follows,
    /// Like relationships.
    Likes,
    /// Save relationships.
    Saves,
}

impl Collection {
    /// Every collection.
    pub const ALL: [Self; 5] = [
        Self::Users,
        Self::Posts,
        Self::Follows,
        Self::Likes,
        Self::Saves,
    ];

    /// The collection path used in store keys.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
            Self::Follows => "follows",
            Self::Likes => "likes",
            Self::Saves => "saves",
        }
    }
}

impl core::fmt::Display for Collection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One write inside an atomic [`DocumentStore::commit`] batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Store `document` at `id`, replacing any existing document.
    Put {
        /// Target collection.
        collection: Collection,
        /// Document key.
        id: String,
        /// Full document body.
        document: Document,
    },
    /// Delete the document at `id`. The whole batch is abandoned if it is
    /// already gone.
    Remove {
        /// Target collection.
        collection: Collection,
        /// Document key.
        id: String,
    },
    /// Add `delta` to the numeric `field` of the document at `id`, flooring
    /// at zero. A missing field counts as zero; a missing document is skipped.
    Adjust {
        /// Target collection.
        collection: Collection,
        /// Document key.
        id: String,
        /// Counter field name.
        field: &'static str,
        /// Signed change.
        delta: i64,
    },
}

impl Mutation {
    /// The collection this mutation writes to.
    pub const fn collection(&self) -> Collection {
        match self {
            Self::Put { collection, .. }
            | Self::Remove { collection, .. }
            | Self::Adjust { collection, .. } => *collection,
        }
    }

    /// The document key this mutation writes to.
    pub fn id(&self) -> &str {
        match self {
            Self::Put { id, .. } | Self::Remove { id, .. } | Self::Adjust { id, .. } => id,
        }
    }
}

/// Apply a signed `delta` to a counter, flooring at zero.
pub const fn adjusted(current: u64, delta: i64) -> u64 {
    if delta >= 0 {
        current.saturating_add(delta.unsigned_abs())
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

/// Storage backend for the feed's documents.
///
/// Implementations must make [`commit`](DocumentStore::commit) atomic with
/// respect to every other operation on the same store.
pub trait DocumentStore: Send + Sync + 'static {
    /// Fetch the document at `id`, or `None` if it does not exist.
    fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> impl Future<Output = Result<Option<Document>, DbError>> + Send;

    /// Fetch every document in `collection`, ordered by key.
    ///
    /// Keys are time-ordered, so this is creation order.
    fn list(
        &self,
        collection: Collection,
    ) -> impl Future<Output = Result<Vec<Document>, DbError>> + Send;

    /// Merge `fields` into the document at `id`, overwriting members with the
    /// same name and leaving the rest untouched.
    ///
    /// Returns `false` without writing anything when the document is missing.
    fn merge(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Apply `batch` atomically.
    ///
    /// Returns `false` and writes nothing if any [`Mutation::Remove`] target
    /// does not exist.
    fn commit(&self, batch: Vec<Mutation>) -> impl Future<Output = Result<bool, DbError>> + Send;
}
