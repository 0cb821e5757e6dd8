pub mod auth;
pub mod discussions;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                login (public)
/// /auth/me                                   current identity (requires auth)
///
/// /users                                     list, create
/// /users/{id}                                get, update, delete
///
/// /discussions                               list, create
/// /discussions/{id}                          get
/// /discussions/{discussion_id}/replies       list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/discussions", discussions::router())
}
