//! Persistence interface for link records
//!
//! The cache core talks to storage through the [`LinkStore`] trait so that
//! business logic stays decoupled from any particular backend:
//!
//! - Production deployments plug in a database-backed implementation
//! - Tests and single-process setups use [`MemoryStore`]
//!
//! Implementations must provide read-your-writes consistency within a
//! process: a `get` issued after a completed `upsert` sees that record.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::LinkRecord;

/// Trait for link record storage backends
///
/// `upsert` is keyed by `url`: exactly one record per URL survives, and a
/// record deleted out-of-band between a lookup and an upsert is simply
/// recreated. Writes replace the whole record so readers never observe a
/// partial update.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Point lookup by URL
    async fn get(&self, url: &str) -> Result<Option<LinkRecord>>;

    /// Insert or replace the record for `record.url`
    async fn upsert(&self, record: &LinkRecord) -> Result<()>;
}
