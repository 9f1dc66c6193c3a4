//! The data access layer handle and the helpers its operations share.
//!
//! [`Dal`] wraps a [`DocumentStore`]. Operations are grouped by entity in
//! sibling modules (`accounts`, `posts`, `follows`, `reactions`), each
//! adding an `impl` block to [`Dal`].
//!
//! Follow, like and save records share one shape: an account pointing at a
//! target. [`Relation`] captures that shape so lookup, insert and removal
//! are written once. A relationship write and the counter it maintains are
//! committed in a single atomic batch.

use schoolfeed_db::{Collection, DocumentStore, Mutation, from_document, to_document};
use schoolfeed_types::{AccountId, Follow, Like, PostId, Save};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DalError;

/// Name of the follower counter on account documents.
pub(crate) const FOLLOWERS_COUNT: &str = "followersCount";
/// Name of the post counter on account documents.
pub(crate) const POSTS_COUNT: &str = "postsCount";
/// Name of the like counter on post documents.
pub(crate) const LIKES: &str = "likes";

/// Data access layer over a document store.
///
/// Cloning is as cheap as cloning the store.
#[derive(Debug, Clone)]
pub struct Dal<S> {
    store: S,
}

impl<S: DocumentStore> Dal<S> {
    /// Create a data access layer over `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Read and decode one record.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<T>, DalError> {
        match self.store.get(collection, id).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Read and decode every record of a collection, in creation order.
    pub(crate) async fn fetch_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, DalError> {
        let documents = self.store.list(collection).await?;
        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            records.push(from_document(document)?);
        }
        Ok(records)
    }

    /// Build a [`Mutation::Put`] for `record`.
    pub(crate) fn put<T: Serialize>(
        collection: Collection,
        id: String,
        record: &T,
    ) -> Result<Mutation, DalError> {
        Ok(Mutation::Put {
            collection,
            id,
            document: to_document(record)?,
        })
    }

    /// Write `record` alone.
    pub(crate) async fn insert<T: Serialize>(
        &self,
        collection: Collection,
        id: String,
        record: &T,
    ) -> Result<(), DalError> {
        self.store
            .commit(vec![Self::put(collection, id, record)?])
            .await?;
        Ok(())
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    /// The first relationship from `account` to `target`, in creation order.
    pub(crate) async fn find_relation<R: Relation>(
        &self,
        account: AccountId,
        target: R::Target,
    ) -> Result<Option<R>, DalError> {
        let relations: Vec<R> = self.fetch_all(R::COLLECTION).await?;
        Ok(relations
            .into_iter()
            .find(|r| r.account_id() == account && r.target() == target))
    }

    /// Every relationship owned by `account`, in creation order.
    pub(crate) async fn relations_of<R: Relation>(
        &self,
        account: AccountId,
    ) -> Result<Vec<R>, DalError> {
        let relations: Vec<R> = self.fetch_all(R::COLLECTION).await?;
        Ok(relations
            .into_iter()
            .filter(|r| r.account_id() == account)
            .collect())
    }

    /// Every relationship pointing at `target`.
    pub(crate) async fn relations_to<R: Relation>(
        &self,
        target: R::Target,
    ) -> Result<Vec<R>, DalError> {
        let relations: Vec<R> = self.fetch_all(R::COLLECTION).await?;
        Ok(relations.into_iter().filter(|r| r.target() == target).collect())
    }

    /// Insert `relation`, bumping `counter` by one in the same batch.
    pub(crate) async fn add_relation<R: Relation>(
        &self,
        relation: &R,
        counter: Option<Counter>,
    ) -> Result<(), DalError> {
        let mut batch = vec![Self::put(R::COLLECTION, relation.record_id(), relation)?];
        if let Some(counter) = counter {
            batch.push(counter.adjust(1));
        }
        self.store.commit(batch).await?;
        Ok(())
    }

    /// Remove the first relationship from `account` to `target`, dropping
    /// `counter` by one in the same batch.
    ///
    /// Returns `false` when there was nothing to remove, including when a
    /// concurrent caller removed the same record first.
    pub(crate) async fn remove_relation<R: Relation>(
        &self,
        account: AccountId,
        target: R::Target,
        counter: Option<Counter>,
    ) -> Result<bool, DalError> {
        let Some(relation) = self.find_relation::<R>(account, target).await? else {
            return Ok(false);
        };
        let mut batch = vec![Mutation::Remove {
            collection: R::COLLECTION,
            id: relation.record_id(),
        }];
        if let Some(counter) = counter {
            batch.push(counter.adjust(-1));
        }
        Ok(self.store.commit(batch).await?)
    }
}

/// A denormalized counter field on a stored document.
#[derive(Debug, Clone)]
pub(crate) struct Counter {
    collection: Collection,
    id: String,
    field: &'static str,
}

impl Counter {
    /// The follower count of a school.
    pub(crate) fn followers(school: AccountId) -> Self {
        Self {
            collection: Collection::Users,
            id: school.to_string(),
            field: FOLLOWERS_COUNT,
        }
    }

    /// The post count of a school.
    pub(crate) fn posts(school: AccountId) -> Self {
        Self {
            collection: Collection::Users,
            id: school.to_string(),
            field: POSTS_COUNT,
        }
    }

    /// The like count of a post.
    pub(crate) fn likes(post: PostId) -> Self {
        Self {
            collection: Collection::Posts,
            id: post.to_string(),
            field: LIKES,
        }
    }

    /// An adjustment of this counter by `delta`. Skipped by the store when
    /// the owning document is missing.
    pub(crate) fn adjust(self, delta: i64) -> Mutation {
        Mutation::Adjust {
            collection: self.collection,
            id: self.id,
            field: self.field,
            delta,
        }
    }
}

/// A join record from an account to a target entity.
pub(crate) trait Relation: Serialize + DeserializeOwned {
    /// Collection holding records of this kind.
    const COLLECTION: Collection;

    /// Identifier type of the target entity.
    type Target: Copy + PartialEq + Send + Sync;

    /// Store key of this record.
    fn record_id(&self) -> String;

    /// The account that owns the relationship.
    fn account_id(&self) -> AccountId;

    /// The entity the relationship points at.
    fn target(&self) -> Self::Target;
}

impl Relation for Follow {
    const COLLECTION: Collection = Collection::Follows;
    type Target = AccountId;

    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn account_id(&self) -> AccountId {
        self.account_id
    }

    fn target(&self) -> AccountId {
        self.school_id
    }
}

impl Relation for Like {
    const COLLECTION: Collection = Collection::Likes;
    type Target = PostId;

    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn account_id(&self) -> AccountId {
        self.account_id
    }

    fn target(&self) -> PostId {
        self.post_id
    }
}

impl Relation for Save {
    const COLLECTION: Collection = Collection::Saves;
    type Target = PostId;

    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn account_id(&self) -> AccountId {
        self.account_id
    }

    fn target(&self) -> PostId {
        self.post_id
    }
}
