//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::auth::identity::Identity;
use crate::response::ApiResponse;
use crate::state::AppState;

/// The verified caller, extracted from `Authorization: Bearer <token>`.
///
/// Rejections are always `unauthorized` envelopes (403), whatever the
/// identity provider reported.
///
/// ```ignore
/// async fn my_handler(AuthUser(identity): AuthUser) -> ApiResponse {
///     ApiResponse::success(identity, "Token verified")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiResponse::unauthorized("No token provided or invalid format"))?;

        let identity = state.identity.verify_token(token).await.map_err(|e| {
            tracing::warn!(code = %e.code, error = %e.message, "Token verification failed");
            ApiResponse::unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser(identity))
    }
}
