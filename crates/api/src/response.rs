//! Response envelope emission.
//!
//! Every handler ends in exactly one [`ApiResponse`]: a success, a
//! classified error, an unauthorized/not-found short-circuit or a page of
//! results. The HTTP status is always taken from `meta.status`, so the two
//! can never disagree.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dissio_core::classify::{classify, ClassifiedError};
use dissio_core::envelope::Envelope;
use dissio_core::error::Failure;
use dissio_core::pagination::Pagination;
use serde::Serialize;
use serde_json::Value;

/// Default message of [`ApiResponse::unauthorized`].
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Default message of [`ApiResponse::not_found`].
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

/// A fully built response envelope, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    envelope: Envelope,
}

impl ApiResponse {
    fn new(status: StatusCode, message: impl Into<String>, data: Value) -> Self {
        Self {
            envelope: Envelope::new(status.as_u16(), message, data),
        }
    }

    /// 200 with `data` as payload.
    pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Self::new(StatusCode::OK, message, data),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response payload");
                Self::error(classify(Failure::Unknown(Value::Null), None))
            }
        }
    }

    /// Render a classified failure.
    pub fn error(classified: ClassifiedError) -> Self {
        let status = StatusCode::from_u16(classified.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, classified.message, classified.detail)
    }

    /// Rejected credentials. Deliberately 403, not 401: clients built
    /// against this API branch on 403 for every auth rejection.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message, Value::Null)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, Value::Null)
    }

    /// The path exists but does not accept the request's method.
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, message, Value::Null)
    }

    /// 200 with a page of items and its `pagination` block.
    pub fn paginated<T: Serialize>(
        data: Vec<T>,
        pagination: Pagination,
        message: impl Into<String>,
    ) -> Self {
        let mut response = Self::success(data, message);
        if response.envelope.meta.status == StatusCode::OK.as_u16() {
            response.envelope = response.envelope.with_pagination(pagination);
        }
        response
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.envelope.meta.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use dissio_core::error::ProviderError;
    use serde_json::json;

    use super::*;

    #[test]
    fn success_builds_ok_envelope() {
        let response = ApiResponse::success(json!({ "id": "x" }), "ok");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(response.envelope()).unwrap(),
            json!({ "meta": { "status": 200, "message": "ok" }, "data": { "id": "x" } })
        );
    }

    #[test]
    fn unauthorized_is_forbidden_with_null_data() {
        let response = ApiResponse::unauthorized(UNAUTHORIZED_MESSAGE);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(response.envelope().meta.status, 403);
        assert!(response.envelope().data.is_null());
    }

    #[test]
    fn not_found_has_null_data() {
        let response = ApiResponse::not_found(NOT_FOUND_MESSAGE);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.envelope().meta.message, "Not Found");
        assert!(response.envelope().data.is_null());
    }

    #[test]
    fn method_not_allowed_has_null_data() {
        let response = ApiResponse::method_not_allowed("Method not allowed");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.envelope().meta.status, 405);
        assert!(response.envelope().data.is_null());
    }

    #[test]
    fn error_mirrors_classified_status() {
        let failure = Failure::Provider(ProviderError::new("auth/already-exists", "dup"));
        let response = ApiResponse::error(classify(failure, Some("Email already in use")));
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(response.envelope().meta.status, 409);
        assert_eq!(response.envelope().data, json!({ "code": "auth/already-exists" }));
    }

    #[test]
    fn paginated_includes_block() {
        let pagination = Pagination {
            total: 3,
            current: 1,
            total_pages: 1,
        };
        let response = ApiResponse::paginated(vec![1, 2, 3], pagination, "page");
        assert_eq!(response.envelope().pagination, Some(pagination));
        assert_eq!(response.envelope().data, json!([1, 2, 3]));
    }
}
