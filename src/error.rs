//! Unified error handling for the unfurl crate
//!
//! All failure paths in the crate surface as a single [`Error`] enum. The
//! coordinator broadcasts one refresh outcome to every caller waiting on the
//! same URL, so the type is `Clone`: source errors (reqwest, storage
//! backends) are rendered into the message at the boundary instead of being
//! carried as live error values.

use thiserror::Error;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller-supplied input was rejected before any work started
    Input,
    /// Network-related errors (HTTP, timeout, connection refused)
    Network,
    /// Metadata extraction errors (page fetched, content unusable)
    Parsing,
    /// Persistence errors on lookup or upsert
    Storage,
    /// Configuration and validation errors
    Config,
}

/// Unified error type for the unfurl crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// URL could not be parsed or is not an absolute http(s) URL
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Caller passed a negative freshness window
    #[error("max_age must not be negative")]
    NegativeMaxAge,

    /// Transport-level failure: the page could not be retrieved
    #[error("fetch failed for {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The page was retrieved but no usable metadata could be extracted
    #[error("metadata extraction failed for {url}: {reason}")]
    ExtractionFailed { url: String, reason: String },

    /// The persistence layer failed on lookup or upsert
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Invalid configuration (bad client settings, unusable values)
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Create an `InvalidUrl` error
    pub fn invalid_url(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a `FetchFailed` error
    pub fn fetch_failed(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::FetchFailed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an `ExtractionFailed` error
    pub fn extraction_failed(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::ExtractionFailed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a `StoreUnavailable` error
    pub fn store_unavailable(reason: impl ToString) -> Self {
        Self::StoreUnavailable(reason.to_string())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is recoverable (the caller can retry later)
    ///
    /// Input errors are not: the same call will fail the same way.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidUrl { .. } | Self::NegativeMaxAge | Self::Config(_) => false,
            Self::FetchFailed { .. } | Self::ExtractionFailed { .. } | Self::StoreUnavailable(_) => {
                true
            }
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl { .. } | Self::NegativeMaxAge => ErrorCategory::Input,
            Self::FetchFailed { .. } => ErrorCategory::Network,
            Self::ExtractionFailed { .. } => ErrorCategory::Parsing,
            Self::StoreUnavailable(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
