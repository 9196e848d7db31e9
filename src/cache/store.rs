//! Storage seam for the feed cache

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use crate::feed::FeedItem;

/// Persisted representation of a feed item
///
/// Mirrors `FeedItem` field for field, but is kept separate so the on-disk
/// format can change without touching the domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "imageURL")]
    pub image_url: Url,
}

impl From<FeedItem> for LocalFeedItem {
    fn from(item: FeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            image_url: item.image_url,
        }
    }
}

impl From<LocalFeedItem> for FeedItem {
    fn from(item: LocalFeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            image_url: item.image_url,
        }
    }
}

/// One full snapshot of the feed as it was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    /// Items in the order they were saved
    pub feed: Vec<LocalFeedItem>,
    /// When the snapshot was saved
    pub timestamp: DateTime<Utc>,
}

/// Errors reported by a `FeedStore`
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading, writing or removing the record failed
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record exists but could not be decoded
    #[error("cached feed is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The background job running the operation did not finish
    #[error("cache worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Durable storage for a single `CachedFeed`
///
/// Each operation completes exactly once, possibly on another thread.
/// Mutations against the same record run in the order they were first
/// polled, and a retrieval never observes a partially applied write.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Removes the stored record; removing a missing record succeeds
    async fn delete_cached_feed(&self) -> Result<(), StoreError>;

    /// Replaces any stored record with `feed` stamped at `timestamp`
    async fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: DateTime<Utc>)
        -> Result<(), StoreError>;

    /// Reads the stored record without modifying it
    ///
    /// # Returns
    /// * `Ok(None)` if nothing is stored
    /// * `Ok(Some(CachedFeed))` if a well-formed record is stored
    /// * `Err(StoreError)` if a record exists but cannot be read
    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError>;
}
