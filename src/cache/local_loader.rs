//! Cache use cases: save, load and validate the local feed snapshot
//!
//! `LocalFeedLoader` combines a `FeedStore`, a `FeedCachePolicy` and an
//! injected clock. It keeps no state of its own between calls.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::policy::FeedCachePolicy;
use super::store::{FeedStore, LocalFeedItem, StoreError};
use crate::feed::{FeedItem, FeedLoader};

/// Source of the current time
pub type CurrentDate = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Reads and writes the feed snapshot held by a `FeedStore`
///
/// * `save` deletes the old snapshot before inserting the new one. If the
///   delete fails nothing is inserted; if the insert fails the cache is left
///   empty.
/// * `load` only reads. Expired snapshots load as an empty feed and stay on
///   disk until `validate_cache` removes them.
/// * `validate_cache` deletes snapshots that are unreadable or expired.
pub struct LocalFeedLoader<S> {
    store: Arc<S>,
    current_date: CurrentDate,
    policy: FeedCachePolicy,
}

// Manual impls: the clock closure is neither Debug nor bound by S: Clone.
impl<S: fmt::Debug> fmt::Debug for LocalFeedLoader<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalFeedLoader")
            .field("store", &self.store)
            .field("current_date", &"<clock>")
            .field("policy", &self.policy)
            .finish()
    }
}

impl<S> Clone for LocalFeedLoader<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            current_date: Arc::clone(&self.current_date),
            policy: self.policy,
        }
    }
}

impl<S: FeedStore + 'static> LocalFeedLoader<S> {
    /// Creates a loader over `store` using `current_date` as its clock
    ///
    /// Uses the default seven-day `FeedCachePolicy`. The store is not touched
    /// until an operation is called.
    pub fn new(
        store: Arc<S>,
        current_date: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        Self {
            store,
            current_date: Arc::new(current_date),
            policy: FeedCachePolicy::default(),
        }
    }

    /// Replaces the freshness policy
    pub fn with_policy(mut self, policy: FeedCachePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The freshness policy in use
    pub fn policy(&self) -> FeedCachePolicy {
        self.policy
    }

    /// Replaces the cached snapshot with `items`, stamped with the current time
    ///
    /// # Returns
    /// * `Ok(())` if the old snapshot was deleted and the new one inserted
    /// * `Err(StoreError)` from the delete (nothing changed) or the insert
    ///   (cache left empty)
    pub async fn save(&self, items: Vec<FeedItem>) -> Result<(), StoreError> {
        self.store.delete_cached_feed().await?;

        let count = items.len();
        let local = items.into_iter().map(LocalFeedItem::from).collect();
        self.store.insert(local, (self.current_date)()).await?;
        debug!(count, "saved feed to cache");

        Ok(())
    }

    /// Loads the cached feed if it is still fresh
    ///
    /// # Returns
    /// * `Ok(items)` for a fresh snapshot
    /// * `Ok(vec![])` if the cache is empty or expired
    /// * `Err(StoreError)` if retrieval failed; the store is left as is
    pub async fn load(&self) -> Result<Vec<FeedItem>, StoreError> {
        match self.store.retrieve().await? {
            Some(cache) if self.policy.validate(cache.timestamp, (self.current_date)()) => {
                Ok(cache.feed.into_iter().map(FeedItem::from).collect())
            }
            Some(cache) => {
                debug!(timestamp = %cache.timestamp, "cached feed expired");
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    /// Deletes the cached snapshot if it cannot be read or has expired
    ///
    /// The result of the corrective delete is logged and discarded.
    pub async fn validate_cache(&self) {
        validate(self.store.as_ref(), self.current_date.as_ref(), self.policy).await;
    }

    /// Runs `validate_cache` as a detached task
    ///
    /// The task holds the store and clock, not the loader, so it completes
    /// even if the loader is dropped first.
    pub fn spawn_validate_cache(&self) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let current_date = Arc::clone(&self.current_date);
        let policy = self.policy;

        tokio::spawn(async move {
            validate(store.as_ref(), current_date.as_ref(), policy).await;
        })
    }
}

async fn validate<S, F>(store: &S, current_date: &F, policy: FeedCachePolicy)
where
    S: FeedStore + ?Sized,
    F: Fn() -> DateTime<Utc> + ?Sized,
{
    let reason = match store.retrieve().await {
        Err(e) => format!("unreadable: {e}"),
        Ok(Some(cache)) if !policy.validate(cache.timestamp, current_date()) => {
            format!("expired at {}", cache.timestamp)
        }
        Ok(_) => return,
    };

    debug!(%reason, "removing invalid cached feed");
    if let Err(e) = store.delete_cached_feed().await {
        warn!(error = %e, "failed to delete invalid cached feed");
    }
}

#[async_trait]
impl<S: FeedStore + 'static> FeedLoader for LocalFeedLoader<S> {
    type Error = StoreError;

    async fn load(&self) -> Result<Vec<FeedItem>, Self::Error> {
        LocalFeedLoader::load(self).await
    }
}
