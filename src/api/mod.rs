//! Remote feed API
//!
//! Fetches the feed over HTTP through the `HttpClient` seam and decodes the
//! `{"items": [...]}` envelope into domain items. Only a 200 response with a
//! fully valid envelope is accepted.

mod http_client;
mod items_mapper;
mod remote_loader;

pub use http_client::{HttpClient, HttpClientError, HttpResponse, ReqwestHttpClient};
pub use remote_loader::{RemoteFeedError, RemoteFeedLoader};
