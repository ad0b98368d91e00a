//! Common test utilities

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use unfurl::error::{Error, Result};
use unfurl::extract::PageExtractor;
use unfurl::id::new_record_id;
use unfurl::models::{LinkRecord, OpenGraphData, PageMetadata};
use unfurl::store::{LinkStore, MemoryStore};

/// Extractor that counts invocations and returns a scripted outcome
///
/// An optional delay keeps the flight open long enough for concurrent
/// callers to join it.
pub struct CountingExtractor {
    calls: AtomicUsize,
    delay: Duration,
    outcome: Result<PageMetadata>,
}

impl CountingExtractor {
    pub fn ok(metadata: PageMetadata) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::ZERO,
            outcome: Ok(metadata),
        }
    }

    #[allow(dead_code)]
    pub fn ok_with_delay(metadata: PageMetadata, delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
            outcome: Ok(metadata),
        }
    }

    #[allow(dead_code)]
    pub fn failing(error: Error, delay: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay,
            outcome: Err(error),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageExtractor for CountingExtractor {
    async fn fetch_and_extract(&self, _url: &str) -> Result<PageMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}

/// Metadata fixture with a recognizable title
pub fn sample_metadata(title: &str) -> PageMetadata {
    PageMetadata {
        title: Some(title.to_string()),
        description: Some("test description".to_string()),
        keywords: vec!["test".to_string(), "fixture".to_string()],
        favicon: Some("https://example.com/favicon.ico".to_string()),
        open_graph: OpenGraphData {
            title: Some(title.to_string()),
            image: Some("https://example.com/og.png".to_string()),
            ..Default::default()
        },
    }
}

/// Write a record for `url` whose last scrape was `age` ago
#[allow(dead_code)]
pub async fn seed_record(
    store: &Arc<MemoryStore>,
    url: &str,
    title: &str,
    age: chrono::Duration,
) -> LinkRecord {
    let record = LinkRecord::from_metadata(
        new_record_id(),
        url,
        sample_metadata(title),
        Utc::now() - age,
    );
    store.upsert(&record).await.unwrap();
    record
}
