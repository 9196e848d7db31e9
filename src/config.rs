//! Configuration for wiring up the feed loaders
//!
//! Everything is set in code by the application shell; there are no
//! environment variables or config files.

use directories::ProjectDirs;
use std::path::PathBuf;
use url::Url;

use crate::cache::{FeedCachePolicy, JsonFeedStore, MAX_CACHE_AGE_DAYS};

/// File name of the cache inside the cache directory
const STORE_FILE_NAME: &str = "feed.store";

/// Returns the default cache file path
///
/// Uses `~/.cache/feedcache/feed.store` on Linux, or the equivalent XDG path on
/// other platforms. Returns `None` if no home directory can be determined.
pub fn default_store_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "feedcache")?;
    Some(project_dirs.cache_dir().join(STORE_FILE_NAME))
}

/// Settings for the remote feed and its local cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// URL the remote loader fetches
    pub feed_url: Url,
    /// Path of the cache file
    pub store_path: PathBuf,
    /// Days a saved feed stays fresh
    pub max_cache_age_days: u64,
}

impl FeedConfig {
    /// Creates a config for `feed_url` using the default store path
    ///
    /// Returns `None` if the default cache directory cannot be determined.
    pub fn new(feed_url: Url) -> Option<Self> {
        default_store_path().map(|store_path| Self::with_store_path(feed_url, store_path))
    }

    /// Creates a config for `feed_url` caching at `store_path`
    pub fn with_store_path(feed_url: Url, store_path: impl Into<PathBuf>) -> Self {
        Self {
            feed_url,
            store_path: store_path.into(),
            max_cache_age_days: MAX_CACHE_AGE_DAYS,
        }
    }

    /// Overrides how many days a saved feed stays fresh
    pub fn with_max_cache_age_days(mut self, days: u64) -> Self {
        self.max_cache_age_days = days;
        self
    }

    /// Freshness policy for these settings
    pub fn policy(&self) -> FeedCachePolicy {
        FeedCachePolicy::new(self.max_cache_age_days)
    }

    /// Disk store at `store_path`
    ///
    /// Build one store per path and share it; separate stores on the same
    /// path do not serialize against each other.
    pub fn store(&self) -> JsonFeedStore {
        JsonFeedStore::with_path(&self.store_path)
    }
}
