//! The identity provider port.

use async_trait::async_trait;
use dissio_core::error::ProviderError;
use serde::Serialize;

/// Result type of every identity provider operation. Failures carry
/// `auth/*` codes.
pub type AuthResult<T> = Result<T, ProviderError>;

/// The holder of a verified ID token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAccount {
    pub uid: String,
}

/// Account fields to change. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdate {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// A successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignIn {
    pub id_token: String,
    pub uid: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Operations the API needs from an authentication service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register an account. Fails with `auth/already-exists` if the email is taken.
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<CreatedAccount>;

    /// Check an ID token and return whom it belongs to.
    async fn verify_token(&self, token: &str) -> AuthResult<Identity>;

    async fn update_account(&self, uid: &str, update: &AccountUpdate) -> AuthResult<()>;

    async fn delete_account(&self, uid: &str) -> AuthResult<()>;

    /// Exchange email and password for an ID token.
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SignIn>;
}
