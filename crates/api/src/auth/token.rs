//! HS256 ID tokens issued by the local identity provider.

use dissio_core::error::{codes, ProviderError};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every ID token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account uid.
    pub sub: String,
    pub email: String,
    /// Display name at the time the token was issued.
    pub name: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    pub jti: String,
}

/// Signing secret and lifetime of ID tokens.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub expiry_mins: i64,
}

impl TokenConfig {
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_mins * 60
    }
}

/// Issue a token for the given account.
pub fn issue_token(
    uid: &str,
    email: &str,
    name: &str,
    config: &TokenConfig,
) -> Result<String, ProviderError> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: uid.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        exp: now + config.expires_in_secs(),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| {
        ProviderError::new(
            codes::AUTH_INTERNAL_ERROR,
            format!("Token signing failed: {e}"),
        )
    })
}

/// Verify signature and expiry, returning the claims.
///
/// Expired tokens fail with `auth/id-token-expired`; anything else wrong
/// with the token fails with `auth/invalid-id-token`.
pub fn decode_token(token: &str, config: &TokenConfig) -> Result<Claims, ProviderError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => {
            ProviderError::new(codes::AUTH_ID_TOKEN_EXPIRED, "ID token has expired")
        }
        _ => ProviderError::new(codes::AUTH_INVALID_ID_TOKEN, format!("ID token is invalid: {e}")),
    })
}
