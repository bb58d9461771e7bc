//! Client-side index loading with memoization and single-flight de-duplication.
//!
//! [`IndexLoader`] is a cheap, cloneable handle owned by the hosting application.
//! The first [`load`](IndexLoader::load) starts a fetch and records it as in flight;
//! every caller arriving before it resolves receives the same shared future, so
//! one network request serves them all. The check-and-set happens synchronously
//! inside `load` before anything is awaited.

use crate::cache::{IndexCache, SharedIndex};
use crate::error::FetchError;
use crate::types::IndexDocument;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// A pending or completed index load. Clones resolve to the same index.
pub type IndexLoad = Shared<BoxFuture<'static, SharedIndex>>;

/// Where the loader gets the index from.
pub trait IndexSource: Send + Sync + 'static {
    fn fetch(&self) -> BoxFuture<'static, Result<SharedIndex, FetchError>>;
}

/// Fetches the index document from the HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpIndexSource {
    client: reqwest::Client,
    url: String,
}

impl HttpIndexSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl IndexSource for HttpIndexSource {
    fn fetch(&self) -> BoxFuture<'static, Result<SharedIndex, FetchError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        async move {
            tracing::debug!(url = %url, "Fetching search index");
            let response = client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }
            let document: IndexDocument = response.json().await?;
            Ok(document.index.into())
        }
        .boxed()
    }
}

/// Reads the index straight from an in-process [`IndexCache`].
#[derive(Debug, Clone)]
pub struct LocalIndexSource {
    cache: Arc<IndexCache>,
}

impl LocalIndexSource {
    pub fn new(cache: Arc<IndexCache>) -> Self {
        Self { cache }
    }
}

impl IndexSource for LocalIndexSource {
    fn fetch(&self) -> BoxFuture<'static, Result<SharedIndex, FetchError>> {
        let cache = self.cache.clone();
        async move {
            cache
                .get()
                .await
                .map_err(|e| FetchError::Local(format!("{:#}", e)))
        }
        .boxed()
    }
}

#[derive(Default)]
struct LoaderState {
    index: Option<SharedIndex>,
    in_flight: Option<IndexLoad>,
    /// Bumped by `clear_cache` so a load started before the clear cannot repopulate it
    generation: u64,
}

struct LoaderInner {
    source: Arc<dyn IndexSource>,
    state: Mutex<LoaderState>,
}

impl LoaderInner {
    fn state(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Memoizing, single-flight index loader.
#[derive(Clone)]
pub struct IndexLoader {
    inner: Arc<LoaderInner>,
}

impl std::fmt::Debug for IndexLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state();
        f.debug_struct("IndexLoader")
            .field("loaded", &state.index.as_ref().map(|i| i.len()))
            .field("in_flight", &state.in_flight.is_some())
            .field("generation", &state.generation)
            .finish()
    }
}

impl IndexLoader {
    pub fn new(source: Arc<dyn IndexSource>) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                source,
                state: Mutex::new(LoaderState::default()),
            }),
        }
    }

    /// Get the index, fetching it if needed.
    ///
    /// 1. Already loaded: resolves immediately.
    /// 2. Load in flight: returns that same load.
    /// 3. Otherwise starts a fetch and records it as in flight.
    ///
    /// A failed fetch is logged and resolves to an empty index; nothing is cached,
    /// so the next call retries.
    pub fn load(&self) -> IndexLoad {
        let mut state = self.inner.state();

        if let Some(index) = &state.index {
            return futures::future::ready(index.clone()).boxed().shared();
        }

        if let Some(load) = &state.in_flight {
            tracing::trace!("Joining in-flight index load");
            return load.clone();
        }

        let generation = state.generation;
        let source = self.inner.source.clone();
        // Weak so an abandoned load does not keep the loader alive through its own state
        let inner: Weak<LoaderInner> = Arc::downgrade(&self.inner);

        let load = async move {
            let result = source.fetch().await;
            let inner = inner.upgrade();
            let mut state = inner.as_ref().map(|inner| inner.state());
            let current = state.as_ref().is_some_and(|s| s.generation == generation);
            if current && let Some(state) = state.as_mut() {
                state.in_flight = None;
            }

            match result {
                Ok(index) => {
                    tracing::debug!(documents = index.len(), "Loaded search index");
                    if current && let Some(state) = state.as_mut() {
                        state.index = Some(index.clone());
                    }
                    index
                }
                Err(e) => {
                    tracing::warn!("Failed to load search index: {}", e);
                    SharedIndex::from(Vec::new())
                }
            }
        }
        .boxed()
        .shared();

        state.in_flight = Some(load.clone());
        load
    }

    /// Start loading in the background. Failures are already absorbed by [`load`](Self::load).
    pub fn preload(&self) -> tokio::task::JoinHandle<()> {
        let load = self.load();
        tokio::spawn(async move {
            load.await;
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.state().index.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state().in_flight.is_some()
    }

    /// Forget the loaded index and any in-flight load; the next `load` re-fetches.
    pub fn clear_cache(&self) {
        let mut state = self.inner.state();
        state.index = None;
        state.in_flight = None;
        state.generation += 1;
    }
}
