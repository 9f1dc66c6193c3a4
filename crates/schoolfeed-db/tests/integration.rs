//! Integration tests for the `Dragonfly` document store.
//!
//! These tests require a live Dragonfly (or Redis 7) instance. Run with:
//!
//! ```bash
//! docker run -d -p 6379:6379 docker.dragonflydb.io/dragonflydb/dragonfly
//! cargo test -p schoolfeed-db -- --ignored
//! ```
//!
//! All tests are marked `#[ignore]` so they are skipped during normal
//! `cargo test` runs. Each test uses its own random namespace.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use schoolfeed_db::{Collection, Document, DocumentStore, DragonflyStore, Mutation};
use serde_json::json;

/// Dragonfly connection URL for the local Docker instance.
const DRAGONFLY_URL: &str = "redis://localhost:6379";

async fn connect() -> DragonflyStore {
    let namespace = format!("schoolfeed-test-{}", uuid::Uuid::new_v4());
    DragonflyStore::connect(DRAGONFLY_URL, &namespace, Duration::from_secs(5))
        .await
        .expect("Failed to connect to Dragonfly -- is it running?")
}

fn doc(value: serde_json::Value) -> Document {
    value.as_object().cloned().unwrap_or_default()
}

fn put(collection: Collection, id: &str, value: serde_json::Value) -> Mutation {
    Mutation::Put {
        collection,
        id: id.to_owned(),
        document: doc(value),
    }
}

#[tokio::test]
#[ignore = "requires live Dragonfly instance"]
async fn put_get_and_list_in_key_order() {
    let store = connect().await;

    store
        .commit(vec![
            put(Collection::Posts, "0002", json!({ "content": "second" })),
            put(Collection::Posts, "0001", json!({ "content": "first" })),
        ])
        .await
        .unwrap();

    let first = store.get(Collection::Posts, "0001").await.unwrap().unwrap();
    assert_eq!(first.get("content"), Some(&json!("first")));

    let listed = store.list(Collection::Posts).await.unwrap();
    let contents: Vec<_> = listed.iter().filter_map(|d| d.get("content")).collect();
    assert_eq!(contents, vec![&json!("first"), &json!("second")]);

    assert!(store.get(Collection::Posts, "9999").await.unwrap().is_none());
    store.clear().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Dragonfly instance"]
async fn merge_is_partial_and_skips_missing() {
    let store = connect().await;
    store
        .commit(vec![put(
            Collection::Users,
            "u1",
            json!({ "name": "Alice", "city": "Pune", "followersCount": 0 }),
        )])
        .await
        .unwrap();

    assert!(
        store
            .merge(Collection::Users, "u1", doc(json!({ "city": "Goa" })))
            .await
            .unwrap()
    );
    assert!(
        !store
            .merge(Collection::Users, "ghost", doc(json!({ "city": "Goa" })))
            .await
            .unwrap()
    );

    let user = store.get(Collection::Users, "u1").await.unwrap().unwrap();
    assert_eq!(user.get("name"), Some(&json!("Alice")));
    assert_eq!(user.get("city"), Some(&json!("Goa")));
    assert!(store.get(Collection::Users, "ghost").await.unwrap().is_none());
    store.clear().await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Dragonfly instance"]
async fn relationship_batch_adjusts_counter_once() {
    let store = connect().await;
    store
        .commit(vec![
            put(Collection::Users, "s1", json!({ "followersCount": 0 })),
            put(Collection::Follows, "f1", json!({ "schoolId": "s1" })),
            Mutation::Adjust {
                collection: Collection::Users,
                id: String::from("s1"),
                field: "followersCount",
                delta: 1,
            },
        ])
        .await
        .unwrap();

    let unfollow = || {
        vec![
            Mutation::Remove {
                collection: Collection::Follows,
                id: String::from("f1"),
            },
            Mutation::Adjust {
                collection: Collection::Users,
                id: String::from("s1"),
                field: "followersCount",
                delta: -1,
            },
        ]
    };
    let (a, b) = tokio::join!(store.commit(unfollow()), store.commit(unfollow()));
    let applied = [a.unwrap(), b.unwrap()];
    assert_eq!(applied.iter().filter(|ok| **ok).count(), 1);

    let school = store.get(Collection::Users, "s1").await.unwrap().unwrap();
    assert_eq!(school.get("followersCount").and_then(serde_json::Value::as_u64), Some(0));
    assert!(store.list(Collection::Follows).await.unwrap().is_empty());
    store.clear().await.unwrap();
}
