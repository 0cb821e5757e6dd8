//! Failure taxonomy shared by every collaborator.
//!
//! Every operation against the document store, the identity provider or a
//! request schema returns one of these types instead of an opaque error, so
//! the classifier can `match` on a closed set of variants.

use serde::Serialize;
use serde_json::Value;

/// Namespaced provider error codes understood by the classifier.
///
/// Codes outside this list are still valid provider errors; they classify
/// as 500.
pub mod codes {
    pub const AUTH_USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const AUTH_ID_TOKEN_EXPIRED: &str = "auth/id-token-expired";
    pub const AUTH_INVALID_ID_TOKEN: &str = "auth/invalid-id-token";
    pub const AUTH_INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    pub const AUTH_PERMISSION_DENIED: &str = "auth/permission-denied";
    pub const AUTH_ALREADY_EXISTS: &str = "auth/already-exists";
    pub const AUTH_INVALID_ARGUMENT: &str = "auth/invalid-argument";
    pub const AUTH_INTERNAL_ERROR: &str = "auth/internal-error";

    pub const STORE_NOT_FOUND: &str = "firestore/not-found";
    pub const STORE_PERMISSION_DENIED: &str = "firestore/permission-denied";
    pub const STORE_ALREADY_EXISTS: &str = "firestore/already-exists";
    pub const STORE_INVALID_ARGUMENT: &str = "firestore/invalid-argument";
    pub const STORE_DATA_LOSS: &str = "firestore/data-loss";
    pub const STORE_UNAVAILABLE: &str = "firestore/unavailable";
}

/// A failure reported by the identity provider or the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    /// Namespaced code, e.g. `auth/user-not-found` or `firestore/not-found`.
    pub code: String,
    /// The provider's own description of the failure.
    pub message: String,
}

impl ProviderError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A request body that failed its schema.
///
/// `messages` holds every rule that failed for `path`, in rule order. Only
/// the first one is surfaced to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {}", .messages.first().map(String::as_str).unwrap_or("invalid"))]
pub struct ValidationError {
    pub path: String,
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            path: path.into(),
            messages,
        }
    }

    /// Shorthand for a single-message failure.
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(path, vec![message.into()])
    }
}

/// Everything a handler can fail with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Failure {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// An opaque payload that is passed through to the client untouched.
    #[error("unexpected failure: {0}")]
    Unknown(Value),
}

impl Failure {
    /// Wrap an arbitrary serializable payload as an unknown failure.
    ///
    /// Payloads that cannot be represented as JSON collapse to `null`.
    pub fn unknown<T: Serialize>(payload: T) -> Self {
        Failure::Unknown(serde_json::to_value(payload).unwrap_or(Value::Null))
    }
}
