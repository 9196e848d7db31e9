//! Shared fixtures and test doubles for unit tests

use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Days, Utc};
use tokio::sync::Notify;
use url::Url;
use uuid::Uuid;

use crate::api::{HttpClient, HttpClientError, HttpResponse};
use crate::cache::{CachedFeed, FeedStore, LocalFeedItem, StoreError, MAX_CACHE_AGE_DAYS};
use crate::feed::FeedItem;

pub(crate) fn any_url() -> Url {
    Url::parse("https://example.com").unwrap()
}

pub(crate) fn any_error() -> StoreError {
    StoreError::Io(io::Error::other("any error"))
}

pub(crate) fn unique_item() -> FeedItem {
    FeedItem::new(
        Uuid::new_v4(),
        Some("any".to_string()),
        Some("any".to_string()),
        any_url(),
    )
}

/// Two distinct items, as domain models and as their persisted form
pub(crate) fn unique_items() -> (Vec<FeedItem>, Vec<LocalFeedItem>) {
    let models = vec![unique_item(), unique_item()];
    let local = models.iter().cloned().map(LocalFeedItem::from).collect();
    (models, local)
}

pub(crate) fn minus_feed_cache_max_age(date: DateTime<Utc>) -> DateTime<Utc> {
    date.checked_sub_days(Days::new(MAX_CACHE_AGE_DAYS)).unwrap()
}

/// A message a `FeedStoreSpy` received, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReceivedMessage {
    DeleteCachedFeed,
    Insert(Vec<LocalFeedItem>, DateTime<Utc>),
    Retrieve,
}

#[derive(Debug, Default)]
enum RetrievalStub {
    #[default]
    Empty,
    Found(CachedFeed),
    Fails,
}

#[derive(Debug, Default)]
struct Stubs {
    deletion_fails: bool,
    insertion_fails: bool,
    hold_deletion: bool,
    retrieval: RetrievalStub,
}

/// `FeedStore` double that records every call and replays stubbed outcomes
#[derive(Debug, Default)]
pub(crate) struct FeedStoreSpy {
    messages: Mutex<Vec<ReceivedMessage>>,
    stubs: Mutex<Stubs>,
    deletion_gate: Notify,
}

impl FeedStoreSpy {
    pub(crate) fn received_messages(&self) -> Vec<ReceivedMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn complete_deletion_with_error(&self) {
        self.stubs.lock().unwrap().deletion_fails = true;
    }

    pub(crate) fn complete_insertion_with_error(&self) {
        self.stubs.lock().unwrap().insertion_fails = true;
    }

    pub(crate) fn complete_retrieval_with_error(&self) {
        self.stubs.lock().unwrap().retrieval = RetrievalStub::Fails;
    }

    pub(crate) fn complete_retrieval_with_empty_cache(&self) {
        self.stubs.lock().unwrap().retrieval = RetrievalStub::Empty;
    }

    pub(crate) fn complete_retrieval(&self, feed: Vec<LocalFeedItem>, timestamp: DateTime<Utc>) {
        self.stubs.lock().unwrap().retrieval =
            RetrievalStub::Found(CachedFeed { feed, timestamp });
    }

    /// Makes deletions wait until `release_deletion` is called
    pub(crate) fn hold_deletion(&self) {
        self.stubs.lock().unwrap().hold_deletion = true;
    }

    pub(crate) fn release_deletion(&self) {
        self.stubs.lock().unwrap().hold_deletion = false;
        self.deletion_gate.notify_waiters();
    }

    fn record(&self, message: ReceivedMessage) {
        self.messages.lock().unwrap().push(message);
    }
}

#[async_trait]
impl FeedStore for FeedStoreSpy {
    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        self.record(ReceivedMessage::DeleteCachedFeed);

        let held = self.stubs.lock().unwrap().hold_deletion;
        if held {
            self.deletion_gate.notified().await;
        }

        if self.stubs.lock().unwrap().deletion_fails {
            Err(any_error())
        } else {
            Ok(())
        }
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedItem>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.record(ReceivedMessage::Insert(feed, timestamp));

        if self.stubs.lock().unwrap().insertion_fails {
            Err(any_error())
        } else {
            Ok(())
        }
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        self.record(ReceivedMessage::Retrieve);

        match &self.stubs.lock().unwrap().retrieval {
            RetrievalStub::Empty => Ok(None),
            RetrievalStub::Found(cache) => Ok(Some(cache.clone())),
            RetrievalStub::Fails => Err(any_error()),
        }
    }
}

/// `HttpClient` double that records requested URLs and replays queued responses
///
/// A request with nothing queued fails as if the connection had dropped.
#[derive(Debug, Default)]
pub(crate) struct HttpClientSpy {
    requested_urls: Mutex<Vec<Url>>,
    responses: Mutex<VecDeque<Option<HttpResponse>>>,
}

impl HttpClientSpy {
    pub(crate) fn requested_urls(&self) -> Vec<Url> {
        self.requested_urls.lock().unwrap().clone()
    }

    pub(crate) fn complete_with(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Some(response));
    }

    pub(crate) fn complete_with_error(&self) {
        self.responses.lock().unwrap().push_back(None);
    }
}

#[async_trait]
impl HttpClient for HttpClientSpy {
    async fn get(&self, url: &Url) -> Result<HttpResponse, HttpClientError> {
        self.requested_urls.lock().unwrap().push(url.clone());

        let next = self.responses.lock().unwrap().pop_front().flatten();
        match next {
            Some(response) => Ok(response),
            None => Err(HttpClientError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}
