//! The document store port.
//!
//! Handlers and repositories only ever talk to `dyn DocumentStore`; the
//! concrete backend is chosen once at startup and injected through the
//! application state.

use async_trait::async_trait;
use dissio_core::error::{codes, ProviderError};
use dissio_core::types::DocId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field map of a stored document (everything except its id).
pub type Fields = Map<String, Value>;

/// Result type of every store operation.
pub type StoreResult<T> = Result<T, ProviderError>;

/// A document read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocId,
    pub fields: Fields,
}

impl Document {
    /// Decode into a typed model. The document id is exposed as an `id` field.
    pub fn decode<T: DeserializeOwned>(self) -> StoreResult<T> {
        let id = self.id;
        let mut fields = self.fields;
        fields.insert("id".to_string(), Value::String(id.clone()));
        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            ProviderError::new(
                codes::STORE_DATA_LOSS,
                format!("Document {id} has an unexpected shape: {e}"),
            )
        })
    }
}

/// Serialize a record into a field map suitable for `add` / `update`.
pub fn to_fields<T: Serialize>(record: &T) -> StoreResult<Fields> {
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(ProviderError::new(
            codes::STORE_INVALID_ARGUMENT,
            format!("Documents must be objects, got {other}"),
        )),
        Err(e) => Err(ProviderError::new(
            codes::STORE_INVALID_ARGUMENT,
            format!("Document could not be encoded: {e}"),
        )),
    }
}

/// Equality filter on a top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// A collection query: equality filters, one sort key, then offset/limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order_by: Option<OrderBy>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Operations the API needs from a document database.
///
/// Collections are addressed by slash-separated paths, so a sub-collection
/// is just `parent/{id}/child`. Failures carry `firestore/*` codes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents of `collection` matching `query`.
    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>>;

    /// Number of documents of `collection` matching every filter.
    async fn count(&self, collection: &str, filters: &[Filter]) -> StoreResult<u64>;

    /// A single document, or `None` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Insert a document under a freshly generated id.
    async fn add(&self, collection: &str, fields: Fields) -> StoreResult<DocId>;

    /// Write a document under a known id, replacing any existing one.
    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    /// Merge `fields` into an existing document. Fails with
    /// `firestore/not-found` when the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()>;

    /// Remove a document. Deleting a missing document is not an error.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}
