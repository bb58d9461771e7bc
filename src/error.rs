//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for application-level plumbing.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at the config, CLI and server layers.
pub type Result<T> = anyhow::Result<T>;

/// Per-file failure while scanning content. Never fatal to a scan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid frontmatter in {}: {source}", .path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure to obtain the index from its source.
///
/// The loader logs these and resolves to an empty index instead of propagating.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("index request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("index endpoint returned status {0}")]
    Status(u16),
    #[error("local index build failed: {0}")]
    Local(String),
}

/// Failure while executing a query.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    #[error("search failed: {0}")]
    Query(String),
}
