//! Request extractors that gate access.
//!
//! - [`auth::AuthUser`] -- Verifies the Bearer token and yields the caller's identity.

pub mod auth;
