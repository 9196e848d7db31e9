//! HTTP client seam used by the remote feed loader
//!
//! The `HttpClient` trait is the only thing the remote loader knows about
//! networking. `ReqwestHttpClient` is the production implementation.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::trace;
use url::Url;

/// Errors that can occur while performing an HTTP request
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// HTTP request failed before a complete response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Transport failure from a client not built on reqwest
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A received HTTP response: status code plus raw body bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, empty when the server sent none
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HttpResponse
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Fetches bytes from a URL
///
/// Implementations may complete on any thread; callers are responsible for
/// moving the result where they need it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Performs a GET request against `url`
    ///
    /// # Returns
    /// * `Ok(HttpResponse)` for any received response, whatever its status
    /// * `Err(HttpClientError)` if no response was received
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpClientError>;
}

/// `HttpClient` backed by a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ReqwestHttpClient with a custom HTTP client
    ///
    /// Timeouts and TLS settings belong on the supplied client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpClientError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        trace!(%url, status, bytes = body.len(), "received HTTP response");

        Ok(HttpResponse { status, body })
    }
}
