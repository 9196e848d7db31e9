//! Local feed cache
//!
//! This module persists the last saved feed as a single time-stamped snapshot
//! and decides whether that snapshot is still fresh. `FeedStore` is the
//! storage seam, `JsonFeedStore` the disk implementation, and
//! `LocalFeedLoader` the save/load/validate use cases on top of them.

mod json_store;
mod local_loader;
mod policy;
mod store;

pub use json_store::JsonFeedStore;
pub use local_loader::{CurrentDate, LocalFeedLoader};
pub use policy::{FeedCachePolicy, MAX_CACHE_AGE_DAYS};
pub use store::{CachedFeed, FeedStore, LocalFeedItem, StoreError};
