//! Content synchronizer.
//!
//! Keeps one content collection available by resolving, in order, the remote
//! endpoint, the primary cache slot and the fallback cache slot. Local writes
//! are applied first and then pushed to the remote; remote write failures are
//! returned but never rolled back.

mod cache;
mod remote;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

pub use remote::ContentRemote;

use crate::api::ApiClient;
use crate::config::SyncOptions;
use crate::models::{ContentFields, ContentId, ContentItem, ContentType, Fields, MANAGED_FIELDS};
use crate::storage::KeyValueStore;
use crate::Result;
use cache::{CacheRead, ContentCache};

/// Point-in-time copy of the synchronizer state.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSnapshot<T = Fields> {
    pub content_type: ContentType,
    pub content: Vec<ContentItem<T>>,
    pub loading: bool,
    pub error: Option<String>,
}

struct SyncState<T> {
    content_type: ContentType,
    /// Bumped on every content type switch.
    generation: u64,
    /// Fetches started in the current generation that have not finished.
    in_flight: usize,
    content: Vec<ContentItem<T>>,
    error: Option<String>,
}

struct FetchOutcome<T> {
    content: Vec<ContentItem<T>>,
    error: Option<String>,
}

/// Synchronized view of one content collection.
///
/// Clones share state. Network calls never run while the state lock is held.
pub struct ContentSynchronizer<S, T = Fields, R = ApiClient> {
    state: Arc<Mutex<SyncState<T>>>,
    cache: Arc<ContentCache<S>>,
    remote: Option<Arc<R>>,
}

impl<S, T, R> Clone for ContentSynchronizer<S, T, R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            cache: Arc::clone(&self.cache),
            remote: self.remote.clone(),
        }
    }
}

impl<S, T> ContentSynchronizer<S, T, ApiClient>
where
    S: KeyValueStore,
    T: ContentFields,
{
    /// Build a synchronizer talking to `options.remote_base_url`, or a
    /// cache-only one when no remote is configured. Does not fetch.
    pub fn new(options: &SyncOptions, content_type: ContentType, store: S) -> Result<Self> {
        let remote = options
            .remote_client_config()
            .map(ApiClient::new)
            .transpose()?;
        Ok(Self::build(options, content_type, store, remote))
    }

    /// [`Self::new`] followed by the initial fetch.
    pub async fn open(options: &SyncOptions, content_type: ContentType, store: S) -> Result<Self> {
        let synchronizer = Self::new(options, content_type, store)?;
        synchronizer.fetch().await;
        Ok(synchronizer)
    }
}

impl<S, T, R> ContentSynchronizer<S, T, R>
where
    S: KeyValueStore,
    T: ContentFields,
    R: ContentRemote,
{
    /// Build a synchronizer over any remote. `options.remote_base_url` is
    /// ignored; only the namespace is used.
    pub fn with_remote(
        options: &SyncOptions,
        content_type: ContentType,
        store: S,
        remote: R,
    ) -> Self {
        Self::build(options, content_type, store, Some(remote))
    }

    fn build(
        options: &SyncOptions,
        content_type: ContentType,
        store: S,
        remote: Option<R>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SyncState {
                content_type,
                generation: 0,
                in_flight: 0,
                content: Vec::new(),
                error: None,
            })),
            cache: Arc::new(ContentCache::new(store, options.namespace.clone())),
            remote: remote.map(Arc::new),
        }
    }

    pub const fn is_cache_only(&self) -> bool {
        self.remote.is_none()
    }

    pub async fn snapshot(&self) -> SyncSnapshot<T> {
        let state = self.lock().await;
        SyncSnapshot {
            content_type: state.content_type.clone(),
            content: state.content.clone(),
            loading: state.in_flight > 0,
            error: state.error.clone(),
        }
    }

    pub async fn content(&self) -> Vec<ContentItem<T>> {
        self.lock().await.content.clone()
    }

    pub async fn content_type(&self) -> ContentType {
        self.lock().await.content_type.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.lock().await.in_flight > 0
    }

    /// Message of the last failed fetch step, if any.
    pub async fn error(&self) -> Option<String> {
        self.lock().await.error.clone()
    }

    /// Refresh the current collection. Never fails: problems degrade to cached
    /// or empty content with `error` set.
    pub async fn fetch(&self) {
        let (content_type, generation) = {
            let mut state = self.lock().await;
            state.in_flight += 1;
            (state.content_type.clone(), state.generation)
        };

        let outcome = self.resolve(&content_type).await;

        let mut state = self.lock().await;
        if state.generation != generation {
            debug!(%content_type, "Discarding fetch result for previous content type");
            return;
        }
        state.in_flight = state.in_flight.saturating_sub(1);
        state.content = outcome.content;
        state.error = outcome.error;
    }

    /// Switch to another collection, dropping the current in-memory items,
    /// and fetch it.
    pub async fn set_content_type(&self, content_type: ContentType) {
        {
            let mut state = self.lock().await;
            state.generation += 1;
            state.in_flight = 0;
            state.content_type = content_type;
            state.content.clear();
            state.error = None;
        }
        self.fetch().await;
    }

    /// Prepend a new item and push it to the remote.
    ///
    /// Managed keys in `fields` are dropped; the item gets its own id and
    /// timestamps. The local collection and primary cache keep the item even when the
    /// remote call fails.
    pub async fn add(&self, fields: T) -> Result<ContentItem<T>> {
        let item = ContentItem::from_fields(fields)?;
        let content_type = {
            let mut state = self.lock().await;
            state.content.insert(0, item.clone());
            self.cache.save_primary(&state.content_type, &state.content);
            state.content_type.clone()
        };

        if let Some(remote) = &self.remote {
            remote
                .create(&content_type, &item)
                .await
                .inspect_err(|error| {
                    warn!(%content_type, id = %item.id, %error, "Remote create failed");
                })?;
        }
        Ok(item)
    }

    /// Merge `patch` over the item with `id` and push the patch to the remote.
    ///
    /// Returns the updated item, or `None` when no local item matched (the
    /// remote call is still made). Managed keys in `patch` are ignored.
    pub async fn update(&self, id: &ContentId, patch: &Fields) -> Result<Option<ContentItem<T>>> {
        let patch: Fields = patch
            .iter()
            .filter(|(key, _)| !MANAGED_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let (content_type, updated) = {
            let mut state = self.lock().await;
            let updated = match state.content.iter().position(|item| &item.id == id) {
                Some(index) => {
                    let item = state.content[index].patched(&patch, Utc::now())?;
                    state.content[index] = item.clone();
                    Some(item)
                }
                None => {
                    debug!(
                        content_type = %state.content_type,
                        %id,
                        "Update target not in local content"
                    );
                    None
                }
            };
            self.cache.save_primary(&state.content_type, &state.content);
            (state.content_type.clone(), updated)
        };

        if let Some(remote) = &self.remote {
            remote
                .update(&content_type, id, &patch)
                .await
                .inspect_err(|error| {
                    warn!(%content_type, %id, %error, "Remote update failed");
                })?;
        }
        Ok(updated)
    }

    /// Remove the item with `id` and delete it remotely.
    ///
    /// Returns whether a local item was removed.
    pub async fn remove(&self, id: &ContentId) -> Result<bool> {
        let (content_type, removed) = {
            let mut state = self.lock().await;
            let before = state.content.len();
            state.content.retain(|item| &item.id != id);
            let removed = state.content.len() != before;
            self.cache.save_primary(&state.content_type, &state.content);
            (state.content_type.clone(), removed)
        };

        if let Some(remote) = &self.remote {
            remote
                .delete(&content_type, id)
                .await
                .inspect_err(|error| {
                    warn!(%content_type, %id, %error, "Remote delete failed");
                })?;
        }
        Ok(removed)
    }

    async fn resolve(&self, content_type: &ContentType) -> FetchOutcome<T> {
        let mut error = None;

        if let Some(remote) = &self.remote {
            match remote.list::<T>(content_type).await {
                Ok(items) => {
                    debug!(%content_type, count = items.len(), "Fetched remote content");
                    self.cache.save_primary(content_type, &items);
                    self.cache.save_fallback(content_type, &items);
                    return FetchOutcome {
                        content: items,
                        error: None,
                    };
                }
                Err(remote_error) => {
                    warn!(%content_type, error = %remote_error, "Remote fetch failed, using cache");
                    error = Some(remote_error.to_string());
                }
            }
        }

        match self.cache.load_primary::<T>(content_type) {
            CacheRead::Hit(items) => return FetchOutcome { content: items, error },
            CacheRead::Miss => {}
            CacheRead::Malformed(message) => {
                error.get_or_insert(message);
            }
        }

        match self.cache.load_fallback::<T>(content_type) {
            CacheRead::Hit(items) => return FetchOutcome { content: items, error },
            CacheRead::Miss => {}
            CacheRead::Malformed(message) => {
                error.get_or_insert(message);
            }
        }

        FetchOutcome {
            content: Vec::new(),
            error,
        }
    }

    async fn lock(&self) -> MutexGuard<'_, SyncState<T>> {
        self.state.lock().await
    }
}
