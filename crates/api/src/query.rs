//! Shared query parameter types for API handlers.

use dissio_core::pagination::PageRequest;
use serde::Deserialize;

/// Pagination parameters (`?page=&limit=`) for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Resolve against the configured default page size.
    pub fn resolve(&self, default_limit: u32) -> PageRequest {
        PageRequest::new(self.page, self.limit, default_limit)
    }
}
