//! Shared fixtures for the DAL unit tests.

use schoolfeed_db::{Collection, DbError, Document, DocumentStore, MemoryStore, Mutation};
use schoolfeed_types::{Account, AccountDraft, Category, Post, PostDraft, Role};

use crate::dal::Dal;

pub(crate) fn dal() -> Dal<MemoryStore> {
    Dal::new(MemoryStore::new())
}

/// A school called `name` whose school name is "`name` High School".
pub(crate) fn school_draft(name: &str, city: &str) -> AccountDraft {
    AccountDraft {
        name: name.to_owned(),
        email: format!("{}@school.example", name.to_lowercase()),
        password: String::from("secret"),
        role: Role::School,
        city: Some(city.to_owned()),
        school_name: Some(format!("{name} High School")),
        ..AccountDraft::default()
    }
}

pub(crate) fn user_draft(name: &str) -> AccountDraft {
    AccountDraft {
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        password: String::from("secret"),
        role: Role::User,
        ..AccountDraft::default()
    }
}

pub(crate) async fn publish(
    dal: &Dal<MemoryStore>,
    school: &Account,
    content: &str,
    category: Category,
) -> Result<Post, crate::DalError> {
    dal.create_post(PostDraft::for_school(school, content, category))
        .await
}

/// A store whose every call fails, for checking that errors propagate.
pub(crate) struct FailingStore;

fn unavailable() -> DbError {
    DbError::Timeout(String::from("store unavailable"))
}

impl DocumentStore for FailingStore {
    async fn get(&self, _collection: Collection, _id: &str) -> Result<Option<Document>, DbError> {
        Err(unavailable())
    }

    async fn list(&self, _collection: Collection) -> Result<Vec<Document>, DbError> {
        Err(unavailable())
    }

    async fn merge(
        &self,
        _collection: Collection,
        _id: &str,
        _fields: Document,
    ) -> Result<bool, DbError> {
        Err(unavailable())
    }

    async fn commit(&self, _batch: Vec<Mutation>) -> Result<bool, DbError> {
        Err(unavailable())
    }
}
