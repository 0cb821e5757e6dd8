//! Handlers for `/auth`: signing in and inspecting the current token.

use axum::extract::State;
use dissio_core::error::ValidationError;
use dissio_core::validation::{Field, Schema};
use serde::Deserialize;

use crate::error::{AppResult, WithFallback};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Body of `POST /auth/login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Schema for LoginRequest {
    type Output = Credentials;

    fn validate(self) -> Result<Credentials, ValidationError> {
        Ok(Credentials {
            email: Field::new("email", self.email)
                .required("Email is required")
                .into_required()?,
            password: Field::new("password", self.password)
                .required("Password is required")
                .into_required()?,
        })
    }
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> AppResult<ApiResponse> {
    sign_in(&state, body).await.fallback_message("Error signing in")
}

async fn sign_in(state: &AppState, body: LoginRequest) -> AppResult<ApiResponse> {
    let credentials = body.validate()?;
    let session = state
        .identity
        .sign_in(&credentials.email, &credentials.password)
        .await?;

    tracing::info!(uid = %session.uid, "User signed in");
    Ok(ApiResponse::success(session, "Signed in successfully"))
}

/// GET /auth/me
pub async fn me(AuthUser(identity): AuthUser) -> ApiResponse {
    ApiResponse::success(identity, "Token verified")
}
