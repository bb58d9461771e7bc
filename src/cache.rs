//! Process-lifetime cache of the aggregated search index.
//!
//! The index is built by [`ContentScanner`] on the first [`IndexCache::get`] and then
//! served unchanged until [`IndexCache::clear`] is called. There is no TTL.

use crate::content::ContentScanner;
use crate::error::Result;
use crate::types::SearchIndexItem;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared, immutable snapshot of the index.
pub type SharedIndex = Arc<[SearchIndexItem]>;

pub struct IndexCache {
    scanner: ContentScanner,
    /// Held across a build so concurrent first callers wait for one scan
    index: Mutex<Option<SharedIndex>>,
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("root", &self.scanner.root())
            .field("built", &self.index.try_lock().map(|i| i.is_some()).ok())
            .finish()
    }
}

impl IndexCache {
    pub fn new(scanner: ContentScanner) -> Self {
        Self {
            scanner,
            index: Mutex::new(None),
        }
    }

    /// Get the cached index, scanning the content root on first use.
    ///
    /// Fails only when the content root itself cannot be read; a failed build is
    /// not cached, so the next call retries.
    pub async fn get(&self) -> Result<SharedIndex> {
        let mut guard = self.index.lock().await;
        if let Some(index) = guard.as_ref() {
            tracing::trace!("Index cache hit");
            return Ok(index.clone());
        }

        let scanner = self.scanner.clone();
        let root = scanner.root().to_path_buf();
        let (items, report) = tokio::task::spawn_blocking(move || scanner.scan())
            .await
            .context("Index build task panicked")?
            .with_context(|| format!("Failed to read content root {}", root.display()))?;

        tracing::info!(
            documents = items.len(),
            skipped = report.skipped,
            failed = report.failed,
            "Built search index"
        );

        let index: SharedIndex = items.into();
        *guard = Some(index.clone());
        Ok(index)
    }

    /// Drop the cached index so the next [`get`](Self::get) rebuilds it.
    pub async fn clear(&self) {
        if self.index.lock().await.take().is_some() {
            tracing::info!("Cleared search index cache");
        }
    }

    pub async fn is_built(&self) -> bool {
        self.index.lock().await.is_some()
    }
}
