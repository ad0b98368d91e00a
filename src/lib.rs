//! unfurl - Web page metadata cache
//!
//! A caching layer for link-preview metadata: given a URL, fetch the page,
//! extract title/description/keywords/favicon/Open-Graph fields, and serve
//! repeat requests from the cache while the record is fresh. Stale or
//! missing records are refreshed with at-most-one fetch in flight per URL,
//! no matter how many callers ask at once.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`coordinator`] - Freshness checks and single-flight refresh
//! - [`extract`] - Page fetching and HTML metadata extraction
//! - [`freshness`] - Pure freshness policy
//! - [`id`] - Time-ordered record identifiers
//! - [`models`] - Core data structures and types
//! - [`store`] - Storage trait and in-memory implementation
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use unfurl::coordinator::FetchCoordinator;
//! use unfurl::extract::HttpExtractor;
//! use unfurl::store::MemoryStore;
//! use unfurl::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!
//!     let store = Arc::new(MemoryStore::new());
//!     let extractor = Arc::new(HttpExtractor::from_config(&config.cache)?);
//!     let coordinator = FetchCoordinator::new(store, extractor);
//!
//!     let record = coordinator
//!         .get_or_refresh("https://example.com", config.default_max_age())
//!         .await?;
//!     println!("{}: {:?}", record.url, record.title);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod freshness;
pub mod id;
pub mod models;
pub mod store;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::coordinator::FetchCoordinator;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::extract::{HttpExtractor, PageExtractor};
    pub use crate::models::{LinkRecord, OpenGraphData, PageMetadata};
    pub use crate::store::{LinkStore, MemoryStore};
}

// Direct re-exports for convenience
pub use error::{Error, Result};
pub use models::{LinkRecord, OpenGraphData, PageMetadata};
