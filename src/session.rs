//! Search session state consumed by a UI layer.
//!
//! A session tracks the current query, its results, and two independent loading
//! flags: `loading` while a query executes and `index_loading` while the initial
//! index download runs. Failures never escape [`SearchSession::search`]; they
//! become the `error` field and an empty result list.
//!
//! Queries are not cancelled or sequenced. If two searches overlap, whichever
//! resolves last writes its results, even when it was issued first. Callers that
//! care should debounce or compare the query they issued against `state().query`.

use crate::config::SESSION_LIMIT;
use crate::error::SearchError;
use crate::search::SearchEngine;
use crate::types::SearchResult;
use futures::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What a session needs from the query engine.
pub trait SearchBackend: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// Warm the index. Must not fail.
    fn preload(&self) -> impl Future<Output = ()> + Send;
}

impl SearchBackend for SearchEngine {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        self.perform_search(query, limit).await
    }

    async fn preload(&self) {
        if let Err(e) = self.preload_index().await {
            tracing::warn!("Index preload task failed: {}", e);
        }
    }
}

/// Observable session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub query: String,
    pub results: Vec<SearchResult>,
    /// A query is executing
    pub loading: bool,
    /// The initial index fetch is running
    pub index_loading: bool,
    pub error: Option<String>,
}

pub struct SearchSession<B> {
    backend: Arc<B>,
    state: Arc<Mutex<SessionState>>,
    limit: usize,
}

impl<B> Clone for SearchSession<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            state: self.state.clone(),
            limit: self.limit,
        }
    }
}

impl<B> std::fmt::Debug for SearchSession<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("state", &*lock(&self.state))
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears `loading` when dropped, so a failed, panicked or cancelled search never
/// leaves the flag stuck.
struct LoadingGuard<'a>(&'a Mutex<SessionState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.0).loading = false;
    }
}

impl<B: SearchBackend> SearchSession<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(SessionState::default())),
            limit: SESSION_LIMIT,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        lock(&self.state).clone()
    }

    /// Begin the session: preload the index in the background, flagging
    /// `index_loading` until it finishes.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        lock(&self.state).index_loading = true;

        let backend = self.backend.clone();
        let state = self.state.clone();
        tokio::spawn(async move {
            backend.preload().await;
            lock(&state).index_loading = false;
        })
    }

    /// Update the query text. Does not search.
    pub fn set_query(&self, query: impl Into<String>) {
        lock(&self.state).query = query.into();
    }

    /// Run `query`, storing results or an error message.
    pub async fn search(&self, query: &str) {
        if query.trim().is_empty() {
            lock(&self.state).results.clear();
            return;
        }

        {
            let mut state = lock(&self.state);
            state.loading = true;
            state.error = None;
        }
        let _loading = LoadingGuard(&self.state);

        let outcome = AssertUnwindSafe(self.backend.search(query, self.limit))
            .catch_unwind()
            .await;

        let mut state = lock(&self.state);
        match outcome {
            Ok(Ok(results)) => state.results = results,
            Ok(Err(e)) => {
                tracing::error!(query, "Search failed: {}", e);
                state.error = Some(e.to_string());
                state.results.clear();
            }
            Err(_) => {
                tracing::error!(query, "Search panicked");
                state.error = Some(SearchError::Query("unexpected error".to_string()).to_string());
                state.results.clear();
            }
        }
    }

    /// Return query, results, loading and error to their initial values.
    pub fn reset_search(&self) {
        let mut state = lock(&self.state);
        state.query.clear();
        state.results.clear();
        state.loading = false;
        state.error = None;
    }
}
