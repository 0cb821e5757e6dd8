//! Route definitions for the `/discussions` resource.
//!
//! Also nests replies under `/discussions/{discussion_id}/replies`.

use axum::routing::get;
use axum::Router;

use crate::handlers::discussions;
use crate::state::AppState;

/// Routes mounted at `/discussions`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
///
/// GET    /{discussion_id}/replies       -> list_replies
/// POST   /{discussion_id}/replies       -> create_reply
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(discussions::list).post(discussions::create))
        .route("/{id}", get(discussions::get_by_id))
        .route(
            "/{discussion_id}/replies",
            get(discussions::list_replies).post(discussions::create_reply),
        )
}
