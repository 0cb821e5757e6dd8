#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use dissio_api::auth::identity::IdentityProvider;
use dissio_api::auth::local::LocalIdentityProvider;
use dissio_api::auth::token::TokenConfig;
use dissio_api::config::{LogFormat, ServerConfig};
use dissio_api::router::build_app_router;
use dissio_api::state::AppState;
use dissio_db::{MemoryStore, StoreHandle};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_page_size: 20,
        log_format: LogFormat::Pretty,
        tokens: TokenConfig {
            secret: "test-secret-that-is-long-enough".to_string(),
            expiry_mins: 15,
        },
    }
}

/// Build the full application router backed by fresh in-memory collaborators.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(MemoryStore::new()))
}

/// Same as [`build_test_app`] but with a caller-held store, so tests can
/// inject failures.
pub fn build_test_app_with_store(store: StoreHandle) -> Router {
    let identity = Arc::new(LocalIdentityProvider::new(test_config().tokens));
    build_test_app_with(store, identity)
}

/// Build the application around caller-supplied collaborators.
pub fn build_test_app_with(store: StoreHandle, identity: Arc<dyn IdentityProvider>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        identity,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, None, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a user through the API and return its `data` object.
pub async fn create_user(app: &Router, name: &str, email: &str, password: &str) -> Value {
    let response = post_json(
        app.clone(),
        "/api/users",
        serde_json::json!({ "displayName": name, "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), 200);
    body_json(response).await["data"].clone()
}

/// Sign in through the API and return the ID token.
pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/auth/login",
        serde_json::json!({ "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), 200);
    body_json(response).await["data"]["idToken"]
        .as_str()
        .unwrap()
        .to_string()
}
