use std::sync::Arc;

use dissio_db::StoreHandle;

use crate::auth::identity::IdentityProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Collaborators are injected here at startup; nothing is reached through
/// globals. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Document store backend.
    pub store: StoreHandle,
    /// Identity provider backend.
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Arc<ServerConfig>,
}
