//! Page fetching and metadata extraction
//!
//! The cache core consumes extraction through the [`PageExtractor`] trait;
//! what "fetch" and "extract" mean is up to the implementation. The crate
//! ships [`HttpExtractor`], which retrieves the page over HTTP and pulls
//! the standard metadata set out of the HTML head:
//!
//! - `<title>`
//! - `<meta name="description">` and `<meta name="keywords">`
//! - `<link rel="icon">` (resolved against the final page URL)
//! - the `og:title` / `og:description` / `og:image` / `og:url` properties

pub mod html;
pub mod http;

pub use html::extract_metadata;
pub use http::HttpExtractor;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PageMetadata;

/// Trait for page fetch + metadata extraction backends
///
/// Errors are opaque to the coordinator beyond their kind: `FetchFailed`
/// when the page could not be retrieved, `ExtractionFailed` when it was
/// retrieved but yielded no usable metadata. Implementations own their
/// retry and timeout policy; the coordinator invokes the extractor at most
/// once per refresh.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    /// Fetch `url` and return the metadata extracted from it
    async fn fetch_and_extract(&self, url: &str) -> Result<PageMetadata>;
}
