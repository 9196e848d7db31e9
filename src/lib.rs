//! Feed Cache Library
//!
//! Loads a feed of items from a remote JSON API and keeps the last saved copy
//! in a local, time-stamped disk cache that expires after a configurable age.

pub mod api;
pub mod cache;
pub mod config;
pub mod feed;

#[cfg(test)]
mod test_support;

pub use api::{HttpClient, ReqwestHttpClient, RemoteFeedError, RemoteFeedLoader};
pub use cache::{FeedCachePolicy, FeedStore, JsonFeedStore, LocalFeedLoader, StoreError};
pub use config::FeedConfig;
pub use feed::{FeedItem, FeedLoader};
