//! Loads feed items from the remote feed API

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::http_client::HttpClient;
use super::items_mapper;
use crate::feed::{FeedItem, FeedLoader};

/// Errors that can occur when loading the remote feed
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFeedError {
    /// No response was received
    #[error("could not reach the feed server")]
    Connectivity,

    /// A response was received but it was not a valid feed
    #[error("feed server returned invalid data")]
    InvalidData,
}

/// Fetches the feed from a fixed URL through an injected `HttpClient`
///
/// The loader never touches the local cache; callers decide whether to save
/// what it returns.
#[derive(Debug)]
pub struct RemoteFeedLoader<C> {
    url: Url,
    client: Arc<C>,
}

impl<C> Clone for RemoteFeedLoader<C> {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: HttpClient> RemoteFeedLoader<C> {
    /// Creates a loader that fetches `url` with `client`
    ///
    /// No request is made until `load` is called.
    pub fn new(url: Url, client: Arc<C>) -> Self {
        Self { url, client }
    }

    /// The URL this loader fetches
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches and decodes the feed
    ///
    /// # Returns
    /// * `Ok(Vec<FeedItem>)` - Items from a 200 response, possibly empty
    /// * `Err(RemoteFeedError::Connectivity)` - If the request failed
    /// * `Err(RemoteFeedError::InvalidData)` - If the response was not a valid feed
    pub async fn load(&self) -> Result<Vec<FeedItem>, RemoteFeedError> {
        let response = match self.client.get(&self.url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %self.url, error = %e, "feed request failed");
                return Err(RemoteFeedError::Connectivity);
            }
        };

        let items = items_mapper::map(&response).inspect_err(|_| {
            warn!(url = %self.url, status = response.status, "feed response rejected");
        })?;
        debug!(url = %self.url, count = items.len(), "loaded remote feed");

        Ok(items)
    }
}

#[async_trait]
impl<C: HttpClient> FeedLoader for RemoteFeedLoader<C> {
    type Error = RemoteFeedError;

    async fn load(&self) -> Result<Vec<FeedItem>, Self::Error> {
        RemoteFeedLoader::load(self).await
    }
}
