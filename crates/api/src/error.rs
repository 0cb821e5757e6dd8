use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use dissio_core::classify::classify;
use dissio_core::error::{Failure, ProviderError, ValidationError};

use crate::response::ApiResponse;

/// Application-level error type for HTTP handlers.
///
/// Carries the [`Failure`] plus an optional message that replaces the
/// classifier's default. The first message attached wins, so a specific
/// message set where the failure happens survives the generic one a
/// handler attaches on its way out.
#[derive(Debug, thiserror::Error)]
#[error("{failure}")]
pub struct AppError {
    failure: Failure,
    message: Option<String>,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn failure(&self) -> &Failure {
        &self.failure
    }

    /// Attach `message` unless one is already set.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if self.message.is_none() {
            self.message = Some(message.into());
        }
        self
    }
}

impl From<Failure> for AppError {
    fn from(failure: Failure) -> Self {
        Self {
            failure,
            message: None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Failure::from(err).into()
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        Failure::from(err).into()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        ValidationError::single("body", rejection.body_text()).into()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        ValidationError::single("query", rejection.body_text()).into()
    }
}

/// Attach a fallback message to a handler result.
pub trait WithFallback<T> {
    fn fallback_message(self, message: &str) -> AppResult<T>;
}

impl<T> WithFallback<T> for AppResult<T> {
    fn fallback_message(self, message: &str) -> AppResult<T> {
        self.map_err(|e| e.with_message(message))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let classified = classify(self.failure, self.message.as_deref());

        if classified.status >= 500 {
            tracing::error!(
                status = classified.status,
                detail = %classified.detail,
                message = %classified.message,
                "Request failed",
            );
        } else {
            tracing::debug!(
                status = classified.status,
                kind = ?classified.kind,
                message = %classified.message,
                "Request rejected",
            );
        }

        ApiResponse::error(classified).into_response()
    }
}
