//! Maps a [`Failure`] onto an HTTP status, a message and a detail payload.
//!
//! Classification is priority-ordered: validation first, then provider
//! errors (status resolved from a fixed code table), then everything else
//! as an opaque 500.

use serde_json::{json, Map, Value};

use crate::error::{codes, Failure};

/// Message used for validation failures when the caller supplies none.
pub const DEFAULT_VALIDATION_MESSAGE: &str = "Validation failed";

/// Message used for unknown failures when the caller supplies none.
pub const DEFAULT_UNKNOWN_MESSAGE: &str = "An unexpected server error occurred.";

/// Which tier of the classifier produced a [`ClassifiedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Provider,
    Unknown,
}

/// A failure normalized for rendering into the response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    /// HTTP status code.
    pub status: u16,
    pub message: String,
    /// Goes into the envelope's `data` field.
    pub detail: Value,
}

/// Resolve the HTTP status for a provider error code.
pub fn provider_status(code: &str) -> u16 {
    match code {
        codes::AUTH_USER_NOT_FOUND | codes::STORE_NOT_FOUND => 404,
        codes::AUTH_ID_TOKEN_EXPIRED | codes::AUTH_INVALID_ID_TOKEN => 401,
        codes::AUTH_INVALID_CREDENTIAL => 400,
        codes::AUTH_PERMISSION_DENIED | codes::STORE_PERMISSION_DENIED => 403,
        codes::AUTH_ALREADY_EXISTS | codes::STORE_ALREADY_EXISTS => 409,
        codes::AUTH_INVALID_ARGUMENT | codes::STORE_INVALID_ARGUMENT => 400,
        _ => 500,
    }
}

/// Classify `failure`, preferring `fallback` over the default message.
///
/// An empty fallback is treated as absent. Never panics, whatever the
/// payload of an unknown failure looks like.
pub fn classify(failure: Failure, fallback: Option<&str>) -> ClassifiedError {
    let fallback = fallback.filter(|m| !m.is_empty());

    match failure {
        Failure::Validation(err) => {
            let mut detail = Map::new();
            // Only the first message of the failing field is surfaced.
            let first = err.messages.into_iter().next().unwrap_or_default();
            detail.insert(err.path, Value::String(first));

            ClassifiedError {
                kind: ErrorKind::Validation,
                status: 400,
                message: fallback.unwrap_or(DEFAULT_VALIDATION_MESSAGE).to_string(),
                detail: Value::Object(detail),
            }
        }
        Failure::Provider(err) => ClassifiedError {
            kind: ErrorKind::Provider,
            status: provider_status(&err.code),
            message: fallback.map(str::to_string).unwrap_or(err.message),
            detail: json!({ "code": err.code }),
        },
        Failure::Unknown(payload) => ClassifiedError {
            kind: ErrorKind::Unknown,
            status: 500,
            message: fallback.unwrap_or(DEFAULT_UNKNOWN_MESSAGE).to_string(),
            detail: payload,
        },
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::{ProviderError, ValidationError};

    fn provider(code: &str, message: &str) -> Failure {
        Failure::Provider(ProviderError::new(code, message))
    }

    // -- validation ---------------------------------------------------------

    #[test]
    fn validation_surfaces_only_the_first_message() {
        let err = ValidationError::new(
            "email",
            vec![
                "Must be a valid email".to_string(),
                "Email is required".to_string(),
            ],
        );

        let classified = classify(err.into(), None);

        assert_eq!(classified.kind, ErrorKind::Validation);
        assert_eq!(classified.status, 400);
        assert_eq!(classified.message, "Validation failed");
        assert_eq!(classified.detail, json!({ "email": "Must be a valid email" }));
    }

    #[test]
    fn validation_prefers_fallback_message() {
        let err = ValidationError::single("title", "Title is required");
        let classified = classify(err.into(), Some("Error creating discussion"));
        assert_eq!(classified.message, "Error creating discussion");
        assert_eq!(classified.detail, json!({ "title": "Title is required" }));
    }

    #[test]
    fn validation_without_messages_reports_empty_string() {
        let classified = classify(ValidationError::new("name", vec![]).into(), None);
        assert_eq!(classified.status, 400);
        assert_eq!(classified.detail, json!({ "name": "" }));
    }

    // -- provider -----------------------------------------------------------

    #[test]
    fn every_table_code_maps_to_its_status() {
        let table = [
            (codes::AUTH_USER_NOT_FOUND, 404),
            (codes::STORE_NOT_FOUND, 404),
            (codes::AUTH_ID_TOKEN_EXPIRED, 401),
            (codes::AUTH_INVALID_ID_TOKEN, 401),
            (codes::AUTH_INVALID_CREDENTIAL, 400),
            (codes::AUTH_PERMISSION_DENIED, 403),
            (codes::STORE_PERMISSION_DENIED, 403),
            (codes::AUTH_ALREADY_EXISTS, 409),
            (codes::STORE_ALREADY_EXISTS, 409),
            (codes::AUTH_INVALID_ARGUMENT, 400),
            (codes::STORE_INVALID_ARGUMENT, 400),
        ];

        for (code, status) in table {
            let classified = classify(provider(code, "boom"), None);
            assert_eq!(classified.status, status, "code {code}");
            assert_eq!(classified.kind, ErrorKind::Provider);
            assert_eq!(classified.detail, json!({ "code": code }));
        }
    }

    #[test]
    fn unlisted_codes_map_to_500() {
        for code in [
            codes::AUTH_INTERNAL_ERROR,
            codes::STORE_DATA_LOSS,
            "firestore/unavailable",
            "auth/email-already-exists",
            "",
        ] {
            assert_eq!(classify(provider(code, "x"), None).status, 500, "code {code}");
        }
    }

    #[test]
    fn already_exists_with_fallback() {
        let classified = classify(
            provider("auth/already-exists", "dup"),
            Some("Email already in use"),
        );
        assert_eq!(classified.status, 409);
        assert_eq!(classified.message, "Email already in use");
        assert_eq!(classified.detail, json!({ "code": "auth/already-exists" }));
    }

    #[test]
    fn expired_token_without_fallback_keeps_provider_message() {
        let classified = classify(provider("auth/id-token-expired", "expired"), None);
        assert_eq!(classified.status, 401);
        assert_eq!(classified.message, "expired");
    }

    #[test]
    fn empty_fallback_counts_as_absent() {
        let classified = classify(provider("firestore/not-found", "no such doc"), Some(""));
        assert_eq!(classified.message, "no such doc");
    }

    // -- unknown ------------------------------------------------------------

    #[test]
    fn unknown_payloads_pass_through() {
        for payload in [json!("plain string"), Value::Null, json!(42), json!({ "code": 7 })] {
            let classified = classify(Failure::Unknown(payload.clone()), None);
            assert_matches!(classified.kind, ErrorKind::Unknown);
            assert_eq!(classified.status, 500);
            assert_eq!(classified.message, DEFAULT_UNKNOWN_MESSAGE);
            assert_eq!(classified.detail, payload);
        }
    }

    #[test]
    fn unknown_prefers_fallback_message() {
        let classified = classify(Failure::unknown("disk on fire"), Some("Error getting users"));
        assert_eq!(classified.message, "Error getting users");
        assert_eq!(classified.detail, json!("disk on fire"));
    }
}
