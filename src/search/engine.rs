//! Query entry points over a loaded index.

use super::scoring::rank;
use crate::config::DEFAULT_LIMIT;
use crate::error::SearchError;
use crate::loader::{IndexLoader, IndexSource};
use crate::types::SearchResult;
use std::sync::Arc;

/// Query engine bound to one [`IndexLoader`].
#[derive(Debug, Clone)]
pub struct SearchEngine {
    loader: IndexLoader,
}

impl SearchEngine {
    pub fn new(loader: IndexLoader) -> Self {
        Self { loader }
    }

    pub fn from_source(source: Arc<dyn IndexSource>) -> Self {
        Self::new(IndexLoader::new(source))
    }

    pub fn loader(&self) -> &IndexLoader {
        &self.loader
    }

    /// Rank the index against `query` and return at most `limit` results.
    ///
    /// A blank query returns immediately without touching the index. Scoring is a
    /// linear pass over every item and runs on the blocking pool.
    pub async fn perform_search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let index = self.loader.load().await;
        let query = query.to_string();
        tokio::task::spawn_blocking(move || rank(&index, &query, limit))
            .await
            .map_err(|e| SearchError::Query(e.to_string()))
    }

    /// [`perform_search`](Self::perform_search) with the default limit.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        self.perform_search(query, DEFAULT_LIMIT).await
    }

    pub fn preload_index(&self) -> tokio::task::JoinHandle<()> {
        self.loader.preload()
    }

    pub fn clear_index_cache(&self) {
        self.loader.clear_cache();
    }

    pub fn is_index_loaded(&self) -> bool {
        self.loader.is_loaded()
    }
}
