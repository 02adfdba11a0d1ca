//! Clamor Store
//!
//! The persistence boundary for complaint records: a small
//! create/get/list/update trait plus an in-memory implementation.
//! A persistent backend (SQL, KV, ...) would implement the same trait;
//! the rest of the system only sees the seam.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clamor_core::{Complaint, NewComplaint, Status};

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors from the record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record exists with the given id
    #[error("complaint with ID {0} not found")]
    NotFound(i64),

    /// Backend failure (connection loss, corruption, ...)
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a new backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Filters for listing complaints
///
/// Both filters are optional and combine conjunctively; the empty
/// filter matches everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    /// Exact status match
    pub status: Option<Status>,

    /// Only records created at or after this instant
    pub since: Option<DateTime<Utc>>,
}

impl ListFilter {
    /// A filter matching all records
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to records created at or after the given instant
    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }
}

/// Persistence operations on complaint records
///
/// `list` must return records ordered newest-first by creation
/// timestamp regardless of insertion order.
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Insert a new record, assigning its id and timestamp
    async fn create(&self, complaint: NewComplaint) -> StoreResult<Complaint>;

    /// Fetch a record by id
    async fn get(&self, id: i64) -> StoreResult<Option<Complaint>>;

    /// List records matching the filter, newest first
    async fn list(&self, filter: ListFilter) -> StoreResult<Vec<Complaint>>;

    /// Overwrite an existing record (matched by id)
    async fn update(&self, complaint: Complaint) -> StoreResult<Complaint>;
}
