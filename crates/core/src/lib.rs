//! Dissio core: the failure taxonomy, the error classifier, the response
//! envelope and request validation. Pure logic with no I/O.

pub mod classify;
pub mod envelope;
pub mod error;
pub mod pagination;
pub mod types;
pub mod validation;
