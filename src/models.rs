// Core data structures for the unfurl metadata cache

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cached metadata for a single web page
///
/// One record exists per URL. The `id` is assigned on the first successful
/// scrape and never changes; every later refresh replaces the content fields
/// and advances `last_scraped` as a whole-record write, so readers never see
/// a mix of old and new fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Time-ordered unique identifier, assigned once per URL
    pub id: Uuid,

    /// Request key; unique across all records, immutable
    pub url: String,

    /// Page title from the `<title>` tag
    pub title: Option<String>,

    /// Meta description
    pub description: Option<String>,

    /// Keywords in extraction order; duplicates are kept as-is
    pub keywords: Vec<String>,

    /// Resolved favicon URL
    pub favicon: Option<String>,

    /// Open Graph metadata for social previews
    pub open_graph: OpenGraphData,

    /// When the page metadata was last successfully extracted
    pub last_scraped: DateTime<Utc>,
}

/// Open Graph metadata used when the page is shared on social platforms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraphData {
    /// `og:title`, may differ from the HTML title
    pub title: Option<String>,

    /// `og:description`
    pub description: Option<String>,

    /// `og:image` preview image URL
    pub image: Option<String>,

    /// `og:url` canonical URL
    pub url: Option<String>,
}

/// What an extractor produces for a page: a [`LinkRecord`] minus identity
/// and timestamp, which the coordinator fills in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub favicon: Option<String>,
    pub open_graph: OpenGraphData,
}

impl PageMetadata {
    /// True when extraction found nothing at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.keywords.is_empty()
            && self.favicon.is_none()
            && self.open_graph == OpenGraphData::default()
    }
}

impl LinkRecord {
    /// Build a record for a newly observed URL
    pub fn from_metadata(
        id: Uuid,
        url: impl Into<String>,
        metadata: PageMetadata,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url: url.into(),
            title: metadata.title,
            description: metadata.description,
            keywords: metadata.keywords,
            favicon: metadata.favicon,
            open_graph: metadata.open_graph,
            last_scraped: scraped_at,
        }
    }

    /// Build the replacement record for a refresh
    ///
    /// `id` and `url` carry over untouched; every content field comes from
    /// the new extraction. `last_scraped` never moves backwards even if the
    /// supplied timestamp does.
    pub fn refreshed(&self, metadata: PageMetadata, scraped_at: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            url: self.url.clone(),
            title: metadata.title,
            description: metadata.description,
            keywords: metadata.keywords,
            favicon: metadata.favicon,
            open_graph: metadata.open_graph,
            last_scraped: scraped_at.max(self.last_scraped),
        }
    }

    /// Age of this record relative to `now`
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.last_scraped
    }
}
