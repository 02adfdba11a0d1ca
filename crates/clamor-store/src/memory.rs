//! In-memory complaint store

use async_trait::async_trait;
use chrono::Utc;
use clamor_core::{Complaint, NewComplaint};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::{ComplaintStore, ListFilter, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<i64, Complaint>,
    next_id: i64,
}

/// In-memory `ComplaintStore` backed by a `tokio` RwLock
///
/// Ids are a monotonic sequence starting at 1. Single-record
/// operations are atomic under the lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintStore for MemoryStore {
    async fn create(&self, complaint: NewComplaint) -> StoreResult<Complaint> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let record = Complaint {
            id: inner.next_id,
            text: complaint.text,
            status: complaint.status,
            sentiment: complaint.sentiment,
            category: complaint.category,
            timestamp: Utc::now(),
        };
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Complaint>> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(&id).cloned())
    }

    async fn list(&self, filter: ListFilter) -> StoreResult<Vec<Complaint>> {
        let inner = self.inner.read().await;
        let mut matched: Vec<Complaint> = inner
            .records
            .values()
            .filter(|c| filter.status.map_or(true, |s| c.status == s))
            .filter(|c| filter.since.map_or(true, |since| c.timestamp >= since))
            .cloned()
            .collect();

        // Newest first; id breaks ties deterministically
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(matched)
    }

    async fn update(&self, complaint: Complaint) -> StoreResult<Complaint> {
        let mut inner = self.inner.write().await;
        if !inner.records.contains_key(&complaint.id) {
            return Err(StoreError::NotFound(complaint.id));
        }
        inner.records.insert(complaint.id, complaint.clone());
        Ok(complaint)
    }
}
