//! HTTP page extractor
//!
//! Fetches pages with a shared reqwest client and hands the body to the
//! HTML extractor. Transport problems (connect, timeout, non-2xx status)
//! surface as `FetchFailed`; a retrieved page without usable metadata
//! surfaces as `ExtractionFailed`. No retries here: the coordinator calls
//! the extractor at most once per refresh, and callers own retry policy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::extract::{extract_metadata, PageExtractor};
use crate::models::PageMetadata;

/// [`PageExtractor`] backed by an HTTP client
pub struct HttpExtractor {
    client: Client,
}

impl HttpExtractor {
    /// Create an extractor with the given request timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Create an extractor from the cache section of the service config
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(
            Duration::from_secs(config.request_timeout_secs),
            &config.user_agent,
        )
    }
}

#[async_trait]
impl PageExtractor for HttpExtractor {
    async fn fetch_and_extract(&self, url: &str) -> Result<PageMetadata> {
        let request_url = Url::parse(url).map_err(|e| Error::invalid_url(url, e))?;

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|e| Error::fetch_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch_failed(url, format!("HTTP status {status}")));
        }

        // Redirects may have moved us; relative favicons resolve against
        // the final URL, not the requested one.
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| Error::fetch_failed(url, e))?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "page fetched");

        extract_metadata(&body, &final_url)
    }
}
