//! Runtime selection between store implementations.

use crate::dragonfly::DragonflyStore;
use crate::error::DbError;
use crate::memory::MemoryStore;
use crate::store::{Collection, Document, DocumentStore, Mutation};

/// The store chosen by configuration at startup.
///
/// Dispatches each [`DocumentStore`] call to the wrapped implementation so
/// the rest of the application can hold one concrete type.
#[derive(Clone)]
pub enum StoreBackend {
    /// In-process store. Data is lost on restart.
    Memory(MemoryStore),
    /// Shared `Dragonfly` instance.
    Dragonfly(DragonflyStore),
}

impl StoreBackend {
    /// Short name of the active backend, for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Dragonfly(_) => "dragonfly",
        }
    }
}

impl From<MemoryStore> for StoreBackend {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(store)
    }
}

impl From<DragonflyStore> for StoreBackend {
    fn from(store: DragonflyStore) -> Self {
        Self::Dragonfly(store)
    }
}

impl DocumentStore for StoreBackend {
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>, DbError> {
        match self {
            Self::Memory(store) => store.get(collection, id).await,
            Self::Dragonfly(store) => store.get(collection, id).await,
        }
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, DbError> {
        match self {
            Self::Memory(store) => store.list(collection).await,
            Self::Dragonfly(store) => store.list(collection).await,
        }
    }

    async fn merge(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> Result<bool, DbError> {
        match self {
            Self::Memory(store) => store.merge(collection, id, fields).await,
            Self::Dragonfly(store) => store.merge(collection, id, fields).await,
        }
    }

    async fn commit(&self, batch: Vec<Mutation>) -> Result<bool, DbError> {
        match self {
            Self::Memory(store) => store.commit(batch).await,
            Self::Dragonfly(store) => store.commit(batch).await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_dispatches() {
        let backend = StoreBackend::from(MemoryStore::new());
        assert_eq!(backend.name(), "memory");

        let mut doc = Document::new();
        doc.insert(String::from("name"), serde_json::json!("Greenwood"));
        let applied = backend
            .commit(vec![Mutation::Put {
                collection: Collection::Users,
                id: String::from("s1"),
                document: doc.clone(),
            }])
            .await
            .unwrap();
        assert!(applied);
        assert_eq!(backend.get(Collection::Users, "s1").await.unwrap(), Some(doc));
        assert_eq!(backend.list(Collection::Users).await.unwrap().len(), 1);
    }
}
