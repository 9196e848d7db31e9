//! Freshness rule for cached feeds

use chrono::{DateTime, Days, Utc};

/// Number of days a saved feed stays fresh
pub const MAX_CACHE_AGE_DAYS: u64 = 7;

/// Decides whether a cached snapshot is still fresh
///
/// Freshness depends only on the snapshot timestamp and the reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedCachePolicy {
    max_age_days: u64,
}

impl Default for FeedCachePolicy {
    fn default() -> Self {
        Self::new(MAX_CACHE_AGE_DAYS)
    }
}

impl FeedCachePolicy {
    /// Creates a policy keeping snapshots fresh for `max_age_days` calendar days
    pub fn new(max_age_days: u64) -> Self {
        Self { max_age_days }
    }

    /// Maximum age in calendar days
    pub fn max_age_days(&self) -> u64 {
        self.max_age_days
    }

    /// Returns true if `timestamp` plus the maximum age is still after `now`
    ///
    /// The expiry instant is exclusive: a snapshot exactly `max_age_days` old
    /// is stale. A timestamp too large to add days to is treated as stale.
    pub fn validate(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match timestamp.checked_add_days(Days::new(self.max_age_days)) {
            Some(max_age) => now < max_age,
            None => false,
        }
    }
}
