//! Document storage for the Dissio API: the [`DocumentStore`] port, an
//! in-memory implementation, typed models and repositories.

use std::sync::Arc;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use store::{DocumentStore, StoreResult};

/// Shared handle to whichever store backend the process was started with.
pub type StoreHandle = Arc<dyn DocumentStore>;

/// Create the in-memory store used for local runs.
pub fn create_memory_store() -> StoreHandle {
    Arc::new(MemoryStore::new())
}

/// Check that the store is reachable.
pub async fn health_check(store: &dyn DocumentStore) -> StoreResult<()> {
    store.ping().await
}
