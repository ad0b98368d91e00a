//! In-memory store implementation
//!
//! Reference semantics for [`LinkStore`] and the backend used by the test
//! suite. A `HashMap` keyed by URL behind an async `RwLock`; whole-record
//! reads and writes give the atomic-visibility guarantee for free.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::LinkRecord;
use crate::store::LinkStore;

/// HashMap-backed [`LinkStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, LinkRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Remove the record for `url`, returning it if present
    ///
    /// Eviction is an external policy; the cache core never calls this.
    pub async fn remove(&self, url: &str) -> Option<LinkRecord> {
        self.records.write().await.remove(url)
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn get(&self, url: &str) -> Result<Option<LinkRecord>> {
        Ok(self.records.read().await.get(url).cloned())
    }

    async fn upsert(&self, record: &LinkRecord) -> Result<()> {
        self.records
            .write()
            .await
            .insert(record.url.clone(), record.clone());
        Ok(())
    }
}
