//! Behaviour of the in-memory document store: queries, ordering, paging,
//! updates, deletes and failure injection.

use assert_matches::assert_matches;
use dissio_core::error::{codes, ProviderError};
use dissio_db::store::{to_fields, Direction, DocumentStore, Fields, Filter, Query};
use dissio_db::MemoryStore;
use serde_json::json;

fn fields(value: serde_json::Value) -> Fields {
    to_fields(&value).expect("object literal")
}

async fn seeded() -> MemoryStore {
    let store = MemoryStore::new();
    for (name, rank) in [("b", 2), ("a", 1), ("c", 3)] {
        store
            .add("items", fields(json!({ "name": name, "rank": rank, "kind": "x" })))
            .await
            .unwrap();
    }
    store
        .add("items", fields(json!({ "name": "d", "rank": 4, "kind": "y" })))
        .await
        .unwrap();
    store
}

fn names(docs: &[dissio_db::store::Document]) -> Vec<&str> {
    docs.iter()
        .map(|d| d.fields["name"].as_str().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn query_on_missing_collection_is_empty() {
    let store = MemoryStore::new();
    let docs = store.query("nothing", &Query::new()).await.unwrap();
    assert!(docs.is_empty());
    assert_eq!(store.count("nothing", &[]).await.unwrap(), 0);
}

#[tokio::test]
async fn query_keeps_insertion_order_without_sort() {
    let store = seeded().await;
    let docs = store.query("items", &Query::new()).await.unwrap();
    assert_eq!(names(&docs), vec!["b", "a", "c", "d"]);
}

#[tokio::test]
async fn query_sorts_both_directions() {
    let store = seeded().await;
    let asc = store
        .query("items", &Query::new().order_by("rank", Direction::Asc))
        .await
        .unwrap();
    assert_eq!(names(&asc), vec!["a", "b", "c", "d"]);

    let desc = store
        .query("items", &Query::new().order_by("rank", Direction::Desc))
        .await
        .unwrap();
    assert_eq!(names(&desc), vec!["d", "c", "b", "a"]);
}

#[tokio::test]
async fn query_filters_by_equality() {
    let store = seeded().await;
    let docs = store
        .query("items", &Query::new().filter("kind", "y"))
        .await
        .unwrap();
    assert_eq!(names(&docs), vec!["d"]);

    let filters = [Filter {
        field: "kind".into(),
        value: json!("x"),
    }];
    assert_eq!(store.count("items", &filters).await.unwrap(), 3);
}

#[tokio::test]
async fn query_applies_offset_and_limit_after_sorting() {
    let store = seeded().await;
    let docs = store
        .query(
            "items",
            &Query::new()
                .order_by("rank", Direction::Asc)
                .offset(1)
                .limit(2),
        )
        .await
        .unwrap();
    assert_eq!(names(&docs), vec!["b", "c"]);
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_returns_added_document() {
    let store = MemoryStore::new();
    let id = store.add("items", fields(json!({ "name": "a" }))).await.unwrap();

    let doc = store.get("items", &id).await.unwrap().expect("document exists");
    assert_eq!(doc.id, id);
    assert_eq!(doc.fields["name"], "a");

    assert!(store.get("items", "missing").await.unwrap().is_none());
}

#[tokio::test]
async fn update_merges_fields() {
    let store = MemoryStore::new();
    let id = store
        .add("items", fields(json!({ "name": "a", "rank": 1 })))
        .await
        .unwrap();

    store
        .update("items", &id, fields(json!({ "rank": 5 })))
        .await
        .unwrap();

    let doc = store.get("items", &id).await.unwrap().unwrap();
    assert_eq!(doc.fields["name"], "a");
    assert_eq!(doc.fields["rank"], 5);
}

#[tokio::test]
async fn update_of_missing_document_is_not_found() {
    let store = MemoryStore::new();
    let err = store
        .update("items", "missing", fields(json!({ "rank": 5 })))
        .await
        .unwrap_err();
    assert_eq!(err.code, codes::STORE_NOT_FOUND);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let store = MemoryStore::new();
    let id = store.add("items", fields(json!({ "name": "a" }))).await.unwrap();

    store.delete("items", &id).await.unwrap();
    store.delete("items", &id).await.unwrap();
    assert!(store.get("items", &id).await.unwrap().is_none());
}

#[tokio::test]
async fn sub_collections_are_independent() {
    let store = MemoryStore::new();
    store
        .add("parents/p1/children", fields(json!({ "name": "a" })))
        .await
        .unwrap();
    assert_eq!(store.count("parents/p1/children", &[]).await.unwrap(), 1);
    assert_eq!(store.count("parents/p2/children", &[]).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Failure injection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn injected_failure_hits_next_operation_only() {
    let store = MemoryStore::new();
    store
        .fail_next(ProviderError::new(codes::STORE_PERMISSION_DENIED, "nope"))
        .await;

    let err = store.ping().await.unwrap_err();
    assert_matches!(err.code.as_str(), codes::STORE_PERMISSION_DENIED);
    assert!(store.ping().await.is_ok());
}

#[test]
fn non_object_records_are_rejected() {
    let err = to_fields(&json!([1, 2])).unwrap_err();
    assert_eq!(err.code, codes::STORE_INVALID_ARGUMENT);
}

#[tokio::test]
async fn set_writes_under_the_given_id_and_replaces() {
    let store = MemoryStore::new();
    store
        .set("items", "fixed", fields(json!({ "name": "a", "rank": 1 })))
        .await
        .unwrap();
    store
        .set("items", "fixed", fields(json!({ "name": "b" })))
        .await
        .unwrap();

    let doc = store.get("items", "fixed").await.unwrap().unwrap();
    assert_eq!(doc.fields, fields(json!({ "name": "b" })));
    assert_eq!(store.count("items", &[]).await.unwrap(), 1);
}
