//! In-process [`DocumentStore`] backed by ordered maps.
//!
//! Used for local development and tests. Documents keep insertion order,
//! which is also the tie-breaker when sorting.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use dissio_core::error::{codes, ProviderError};
use dissio_core::types::DocId;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::store::{Direction, Document, DocumentStore, Fields, Filter, Query, StoreResult};

type Collection = IndexMap<DocId, Fields>;

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    /// Failure returned by the next operation, whatever it is.
    injected: Mutex<Option<ProviderError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store operation fail with `err`.
    pub async fn fail_next(&self, err: ProviderError) {
        *self.injected.lock().await = Some(err);
    }

    async fn check_injected(&self) -> StoreResult<()> {
        match self.injected.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn matches(fields: &Fields, filters: &[Filter]) -> bool {
    filters
        .iter()
        .all(|f| fields.get(&f.field).unwrap_or(&Value::Null) == &f.value)
}

/// Cross-type ordering: null < bool < number < string < array < object.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Order two field values. RFC 3339 strings compare as instants so that
/// timestamps with different fractional precision still sort correctly.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            match (
                chrono::DateTime::parse_from_rfc3339(x),
                chrono::DateTime::parse_from_rfc3339(y),
            ) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn query(&self, collection: &str, query: &Query) -> StoreResult<Vec<Document>> {
        self.check_injected().await?;
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut found: Vec<(&DocId, &Fields)> = docs
            .iter()
            .filter(|(_, fields)| matches(fields, &query.filters))
            .collect();

        if let Some(order) = &query.order_by {
            let key = |fields: &Fields| fields.get(&order.field).cloned().unwrap_or(Value::Null);
            // Stable sort, so ties keep insertion order in both directions.
            found.sort_by(|x, y| {
                let (a, b) = (key(x.1), key(y.1));
                match order.direction {
                    Direction::Asc => compare_values(&a, &b),
                    Direction::Desc => compare_values(&b, &a),
                }
            });
        }

        Ok(found
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|(id, fields)| Document {
                id: id.clone(),
                fields: fields.clone(),
            })
            .collect())
    }

    async fn count(&self, collection: &str, filters: &[Filter]) -> StoreResult<u64> {
        self.check_injected().await?;
        let collections = self.collections.read().await;
        let count = collections
            .get(collection)
            .map(|docs| docs.values().filter(|f| matches(f, filters)).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.check_injected().await?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document {
                id: id.to_string(),
                fields: fields.clone(),
            }))
    }

    async fn add(&self, collection: &str, fields: Fields) -> StoreResult<DocId> {
        self.check_injected().await?;
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields);
        tracing::trace!(collection, id = %id, "Document added");
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.check_injected().await?;
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.check_injected().await?;
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| {
                ProviderError::new(
                    codes::STORE_NOT_FOUND,
                    format!("No document to update: {collection}/{id}"),
                )
            })?;
        existing.extend(fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.check_injected().await?;
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            if docs.shift_remove(id).is_some() {
                tracing::trace!(collection, id, "Document deleted");
            }
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_injected().await
    }
}
