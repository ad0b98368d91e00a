//! Freshness policy for cached records
//!
//! A record is servable as-is when its age is within the caller-supplied
//! tolerance. A zero `max_age` means "always refresh"; a negative one is a
//! caller bug and is rejected rather than clamped.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};

/// Decide whether a record scraped at `last_scraped` is still fresh at `now`
/// under the tolerance `max_age`
///
/// Pure function: all three inputs are explicit so the policy is testable
/// without a clock.
pub fn is_fresh(last_scraped: DateTime<Utc>, max_age: Duration, now: DateTime<Utc>) -> Result<bool> {
    if max_age < Duration::zero() {
        return Err(Error::NegativeMaxAge);
    }
    Ok(now - last_scraped <= max_age)
}
