//! In-process document store.
//!
//! Keeps every collection in a [`BTreeMap`] behind one [`RwLock`]. Used by
//! tests and single-node development runs. Holding the write lock for the
//! whole of [`commit`](DocumentStore::commit) makes each batch atomic.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::DbError;
use crate::store::{Collection, Document, DocumentStore, Mutation, adjusted};

type Collections = BTreeMap<Collection, BTreeMap<String, Document>>;

/// An in-memory [`DocumentStore`].
///
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`.
    pub async fn len(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(&collection)
            .map_or(0, BTreeMap::len)
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, DbError> {
        let guard = self.collections.read().await;
        Ok(guard.get(&collection).and_then(|docs| docs.get(id)).cloned())
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, DbError> {
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> Result<bool, DbError> {
        let mut guard = self.collections.write().await;
        let Some(doc) = guard.get_mut(&collection).and_then(|docs| docs.get_mut(id)) else {
            return Ok(false);
        };
        doc.extend(fields);
        Ok(true)
    }

    async fn commit(&self, batch: Vec<Mutation>) -> Result<bool, DbError> {
        let mut guard = self.collections.write().await;

        let removals_present = batch.iter().all(|mutation| match mutation {
            Mutation::Remove { collection, id } => guard
                .get(collection)
                .is_some_and(|docs| docs.contains_key(id)),
            Mutation::Put { .. } | Mutation::Adjust { .. } => true,
        });
        if !removals_present {
            return Ok(false);
        }

        for mutation in batch {
            match mutation {
                Mutation::Put {
                    collection,
                    id,
                    document,
                } => {
                    guard.entry(collection).or_default().insert(id, document);
                }
                Mutation::Remove { collection, id } => {
                    if let Some(docs) = guard.get_mut(&collection) {
                        docs.remove(&id);
                    }
                }
                Mutation::Adjust {
                    collection,
                    id,
                    field,
                    delta,
                } => {
                    if let Some(doc) = guard.get_mut(&collection).and_then(|docs| docs.get_mut(&id))
                    {
                        let current = doc.get(field).and_then(Value::as_u64).unwrap_or(0);
                        doc.insert(field.to_owned(), Value::from(adjusted(current, delta)));
                    }
                }
            }
        }
        Ok(true)
    }
}
