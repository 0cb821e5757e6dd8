//! Identity provider port and its local implementation.
//!
//! - [`identity`] -- the [`IdentityProvider`](identity::IdentityProvider) trait and its
//!   value types.
//! - [`local`] -- in-memory accounts with Argon2id hashes and HS256 ID tokens.
//! - [`token`] -- ID-token issuing and verification.
//! - [`password`] -- Argon2id password hashing and verification.

pub mod identity;
pub mod local;
pub mod password;
pub mod token;
