//! Maps raw feed API responses into domain items

use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use super::http_client::HttpResponse;
use super::remote_loader::RemoteFeedError;
use crate::feed::FeedItem;

/// The only status code accepted from the feed API
const OK_200: u16 = 200;

/// Top-level envelope returned by the feed API
#[derive(Debug, Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

/// A single item as it appears on the wire
///
/// `id` and `image` are required; a missing or mistyped value fails the whole
/// envelope rather than dropping the item.
#[derive(Debug, Deserialize)]
struct RemoteFeedItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    image: Url,
}

impl From<RemoteFeedItem> for FeedItem {
    fn from(item: RemoteFeedItem) -> Self {
        FeedItem {
            id: item.id,
            description: item.description,
            location: item.location,
            image_url: item.image,
        }
    }
}

/// Decodes a feed API response
///
/// # Returns
/// * `Ok(Vec<FeedItem>)` for a 200 response with a well-formed `items` array
/// * `Err(RemoteFeedError::InvalidData)` for any other status or body
pub(crate) fn map(response: &HttpResponse) -> Result<Vec<FeedItem>, RemoteFeedError> {
    if response.status != OK_200 {
        return Err(RemoteFeedError::InvalidData);
    }

    let root: Root =
        serde_json::from_slice(&response.body).map_err(|_| RemoteFeedError::InvalidData)?;

    Ok(root.items.into_iter().map(FeedItem::from).collect())
}
