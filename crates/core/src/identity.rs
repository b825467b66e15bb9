//! Wire-level identity and listing records shared across slices.

use serde::{Deserialize, Serialize};

use crate::Role;

/// Identity record returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Listing pagination as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page (1-based).
    pub current: u64,
    /// Total number of pages.
    pub pages: u64,
    /// Total record count across all pages.
    pub total: u64,
    /// Page size.
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            pages: 1,
            total: 0,
            limit: 10,
        }
    }
}
