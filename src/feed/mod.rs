//! Core feed domain model
//!
//! This module contains the `FeedItem` type shared by every loader and the
//! `FeedLoader` trait that remote and cached sources both implement.

use async_trait::async_trait;
use url::Url;
use uuid::Uuid;

/// A single entry in the content feed
///
/// Identity is the `id`, but equality compares every field so that a changed
/// description or image is observable to callers comparing snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedItem {
    /// Unique identifier for the item
    pub id: Uuid,
    /// Optional free-form description
    pub description: Option<String>,
    /// Optional human-readable location
    pub location: Option<String>,
    /// Location of the item's image
    pub image_url: Url,
}

impl FeedItem {
    /// Creates a new FeedItem
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        image_url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            image_url,
        }
    }
}

/// A source of feed items
///
/// Implemented by both the remote loader and the local cache loader, so an
/// application shell can pick either without caring where items come from.
#[async_trait]
pub trait FeedLoader: Send + Sync {
    /// Error produced when the source cannot deliver items
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the full list of feed items
    async fn load(&self) -> Result<Vec<FeedItem>, Self::Error>;
}
