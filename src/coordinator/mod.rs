//! Fetch coordination: freshness checks and per-URL single-flight refresh
//!
//! [`FetchCoordinator`] owns the one piece of mutable shared state in the
//! crate: a table of in-flight refreshes keyed by URL. For any URL there is
//! at most one extraction running at a time; concurrent callers for the
//! same URL join the running flight and all receive its outcome. Distinct
//! URLs never serialize against each other beyond the table lock itself.
//!
//! A refresh runs on a spawned task, so a caller that gives up and drops
//! its future does not abort the fetch: remaining joiners still get the
//! result and the store is still updated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::extract::PageExtractor;
use crate::freshness::is_fresh;
use crate::id::new_record_id;
use crate::models::LinkRecord;
use crate::store::LinkStore;

/// Outcome of one refresh, delivered to every caller waiting on it
type Outcome = Result<LinkRecord>;

/// What a caller becomes after the atomic check-and-set on the flight table
enum Role {
    /// First caller in: runs the refresh and settles the flight
    Leader(broadcast::Sender<Outcome>),
    /// Flight already running: waits for its outcome
    Joiner(broadcast::Receiver<Outcome>),
}

struct Inner {
    store: Arc<dyn LinkStore>,
    extractor: Arc<dyn PageExtractor>,
    in_flight: Mutex<HashMap<String, broadcast::Sender<Outcome>>>,
}

/// Entry point for metadata lookups with cached-or-refresh semantics
///
/// Cheap to clone; clones share the store, extractor and flight table.
#[derive(Clone)]
pub struct FetchCoordinator {
    inner: Arc<Inner>,
}

impl FetchCoordinator {
    pub fn new(store: Arc<dyn LinkStore>, extractor: Arc<dyn PageExtractor>) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                extractor,
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Return the metadata record for `url`, refreshing it first if the
    /// cached copy is older than `max_age`
    ///
    /// The URL is canonicalized before use: the parsed form keys both the
    /// store and the flight table, so trivial variants like a missing
    /// trailing slash map to one record and one flight.
    ///
    /// Fresh records are returned straight from the store. Stale or absent
    /// records trigger a refresh: the first caller runs it, concurrent
    /// callers for the same URL join it, and all of them receive the same
    /// record or the same error. On failure nothing is written, so a prior
    /// record stays as it was; the caller decides whether stale data is
    /// acceptable.
    ///
    /// # Errors
    ///
    /// `InvalidUrl` / `NegativeMaxAge` for rejected input, `FetchFailed`,
    /// `ExtractionFailed` or `StoreUnavailable` from the refresh itself.
    pub async fn get_or_refresh(&self, url: &str, max_age: Duration) -> Result<LinkRecord> {
        let url = canonical_url(url)?;
        let url = url.as_str();
        if max_age < Duration::zero() {
            return Err(Error::NegativeMaxAge);
        }

        let now = Utc::now();
        if let Some(record) = self.inner.store.get(url).await? {
            if is_fresh(record.last_scraped, max_age, now)? {
                debug!(
                    url = %url,
                    age_secs = record.age(now).num_seconds(),
                    "serving cached record"
                );
                return Ok(record);
            }
        }

        loop {
            match self.join_or_lead(url) {
                Role::Joiner(mut rx) => {
                    debug!(url = %url, "joining in-flight refresh");
                    match rx.recv().await {
                        Ok(outcome) => return outcome,
                        // Flight vanished without settling; contend for a
                        // fresh slot.
                        Err(_) => continue,
                    }
                }
                Role::Leader(tx) => {
                    let mut rx = tx.subscribe();
                    self.spawn_refresh(url.to_string(), max_age, tx);
                    match rx.recv().await {
                        Ok(outcome) => return outcome,
                        Err(_) => continue,
                    }
                }
            }
        }
    }

    /// Atomically join the in-flight refresh for `url`, or register as its
    /// leader if there is none
    fn join_or_lead(&self, url: &str) -> Role {
        let mut in_flight = self.inner.in_flight.lock().unwrap();
        match in_flight.get(url) {
            Some(tx) => Role::Joiner(tx.subscribe()),
            None => {
                let (tx, _) = broadcast::channel(1);
                in_flight.insert(url.to_string(), tx.clone());
                Role::Leader(tx)
            }
        }
    }

    /// Run the refresh to completion on its own task and settle the flight
    ///
    /// The slot is removed before the outcome is sent: a caller arriving
    /// after settlement starts a new flight instead of subscribing to a
    /// finished one.
    fn spawn_refresh(&self, url: String, max_age: Duration, tx: broadcast::Sender<Outcome>) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = refresh(&inner, &url, max_age).await;
            inner.in_flight.lock().unwrap().remove(&url);

            match &outcome {
                Ok(record) => info!(url = %url, id = %record.id, "metadata refreshed"),
                Err(e) => warn!(url = %url, error = %e, "refresh failed"),
            }

            // Every waiter holds a receiver; an empty send only means the
            // last caller went away, and the store update above stands.
            let _ = tx.send(outcome);
        });
    }
}

/// Perform one refresh: re-check the store, fetch + extract, upsert
async fn refresh(inner: &Inner, url: &str, max_age: Duration) -> Outcome {
    let now = Utc::now();
    let existing = inner.store.get(url).await?;

    // A caller that saw a stale record and then lost the race for the slot
    // re-lands here after the winning flight settled. The record it wanted
    // may be fresh now; refetching it would break the one-fetch-per-burst
    // guarantee.
    if let Some(record) = &existing {
        if is_fresh(record.last_scraped, max_age, now)? {
            debug!(url = %url, "record became fresh while acquiring slot");
            return Ok(record.clone());
        }
    }

    let metadata = inner.extractor.fetch_and_extract(url).await?;

    let record = match existing {
        Some(prev) => prev.refreshed(metadata, Utc::now()),
        None => LinkRecord::from_metadata(new_record_id(), url, metadata, Utc::now()),
    };

    inner.store.upsert(&record).await?;
    Ok(record)
}

/// Canonical record/flight key for `url`
///
/// Rejects anything that is not an absolute http(s) URL with a host and
/// returns the parsed form rendered back to a string, so variants that
/// parse identically (`https://example.com` vs `https://example.com/`)
/// share one key.
fn canonical_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|e| Error::invalid_url(url, e))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::invalid_url(
                url,
                format!("unsupported scheme '{other}'"),
            ))
        }
    }

    if parsed.host_str().is_none() {
        return Err(Error::invalid_url(url, "missing host"));
    }

    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_url_accepts_http_and_https() {
        assert!(canonical_url("http://example.com").is_ok());
        assert!(canonical_url("https://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_canonical_url_folds_trailing_slash() {
        assert_eq!(
            canonical_url("https://example.com").unwrap(),
            "https://example.com/"
        );
        assert_eq!(
            canonical_url("https://example.com/").unwrap(),
            "https://example.com/"
        );
    }

    #[test]
    fn test_canonical_url_rejects_other_schemes() {
        let err = canonical_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));

        let err = canonical_url("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_canonical_url_rejects_relative() {
        let err = canonical_url("/just/a/path").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }
}
