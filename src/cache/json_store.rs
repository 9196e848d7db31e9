//! Disk-backed feed store
//!
//! Provides a `JsonFeedStore` that keeps the cached feed in a single JSON file,
//! serializing access to that file so readers never see a half-written record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use super::store::{CachedFeed, FeedStore, LocalFeedItem, StoreError};
use crate::config::default_store_path;

/// On-disk layout of the cache file
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    /// The cached items
    items: Vec<LocalFeedItem>,
    /// When the items were cached
    date: DateTime<Utc>,
}

/// Stores the cached feed as JSON at one path
///
/// Retrievals share a read lock; inserts and deletes take the write lock. The
/// lock is FIFO, so operations run in the order they first wait on it. Each
/// guard travels with its blocking file job, so an operation whose caller
/// stops waiting still finishes before the next one starts.
///
/// Two stores pointed at the same path do not coordinate with each other.
#[derive(Debug, Clone)]
pub struct JsonFeedStore {
    /// Path of the cache file
    path: PathBuf,
    /// Serializes access to `path` across clones of this store
    lock: Arc<RwLock<()>>,
}

impl JsonFeedStore {
    /// Creates a new JsonFeedStore at the default XDG cache location
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        default_store_path().map(Self::with_path)
    }

    /// Creates a new JsonFeedStore backed by the file at `path`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Path of the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FeedStore for JsonFeedStore {
    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        let guard = Arc::clone(&self.lock).write_owned().await;
        let path = self.path.clone();

        run_locked(guard, move || remove_cache_file(&path)).await
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedItem>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let guard = Arc::clone(&self.lock).write_owned().await;
        let path = self.path.clone();

        run_locked(guard, move || {
            write_cache_file(&path, &CacheFile { items: feed, date: timestamp })
        })
        .await
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        let guard = Arc::clone(&self.lock).read_owned().await;
        let path = self.path.clone();

        run_locked(guard, move || read_cache_file(&path)).await
    }
}

/// Runs a blocking file job while holding `guard`
///
/// The guard is handed back with the result and released only once the
/// caller has it. If the caller is gone, it is dropped with the finished job.
async fn run_locked<G, T, F>(guard: G, job: F) -> Result<T, StoreError>
where
    G: Send + 'static,
    T: Send + 'static,
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
{
    let (result, _guard) = tokio::task::spawn_blocking(move || (job(), guard)).await?;
    result
}

/// Reads the cache file, treating a missing file as an empty cache
fn read_cache_file(path: &Path) -> Result<Option<CachedFeed>, StoreError> {
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!(path = %path.display(), "no cached feed");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let cache: CacheFile = serde_json::from_slice(&content)?;
    trace!(path = %path.display(), count = cache.items.len(), "retrieved cached feed");

    Ok(Some(CachedFeed {
        feed: cache.items,
        timestamp: cache.date,
    }))
}

/// Atomically replaces the cache file with `cache`
///
/// The JSON is written to a temporary file next to `path` and renamed over
/// it, so readers see either the old record or the new one.
fn write_cache_file(path: &Path, cache: &CacheFile) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let json = serde_json::to_vec(cache)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(&json)?;
    temp.flush()?;
    temp.as_file_mut().sync_all()?;
    temp.into_temp_path()
        .persist(path)
        .map_err(|e| StoreError::Io(e.error))?;

    debug!(path = %path.display(), count = cache.items.len(), "cached feed written");
    Ok(())
}

/// Removes the cache file; a missing file is not an error
fn remove_cache_file(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "cached feed deleted");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
