//! Page arithmetic for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size when neither the request nor the config sets one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on `limit`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// The `pagination` block of a list envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of items across all pages.
    pub total: u64,
    /// 1-based page number that was returned.
    pub current: u32,
    pub total_pages: u64,
}

/// A resolved page request: 1-based page and a clamped page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Resolve optional query values. `page` is at least 1; `limit` falls
    /// back to `default_limit` and is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Number of items to skip.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.limit as usize
    }

    /// Build the response block for a collection of `total` items.
    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            total,
            current: self.page,
            total_pages: total.div_ceil(u64::from(self.limit)),
        }
    }
}
