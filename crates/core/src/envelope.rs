//! The `{ meta, data, pagination? }` shape every endpoint returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::Pagination;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Mirrors the HTTP status of the response carrying this envelope.
    pub status: u16,
    pub message: String,
}

/// Uniform response body.
///
/// `data` is always serialized; an absent payload is an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub meta: Meta,
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl Envelope {
    pub fn new(status: u16, message: impl Into<String>, data: Value) -> Self {
        Self {
            meta: Meta {
                status,
                message: message.into(),
            },
            data,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}
