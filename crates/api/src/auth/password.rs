//! Argon2id password hashing and verification for local accounts.
//!
//! Hashes are stored as PHC strings, so the algorithm parameters and the
//! random salt travel with the hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use dissio_core::error::{codes, ProviderError};

fn internal(e: argon2::password_hash::Error) -> ProviderError {
    ProviderError::new(codes::AUTH_INTERNAL_ERROR, format!("Password hashing failed: {e}"))
}

/// Hash `password` with Argon2id and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, ProviderError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(internal)
}

/// Check `password` against a stored PHC hash. A mismatch is `Ok(false)`;
/// only a corrupt hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ProviderError> {
    let parsed = PasswordHash::new(hash).map_err(internal)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(internal(e)),
    }
}
