//! Stored documents and the request schemas that produce them.

pub mod discussion;
pub mod user;
