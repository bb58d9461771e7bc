//! Configuration for scanning, serving and querying the index.
//!
//! Values come from an optional TOML file; every field has a default so an empty
//! or absent file yields a working setup. CLI flags override file values.

use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_LIMIT: usize = 10;
pub const SESSION_LIMIT: usize = 15;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root content directory; each immediate subdirectory is a namespace
    pub content_dir: PathBuf,
    /// File extension (without the dot) of indexed documents
    pub extension: String,
    /// Route prefix prepended to every document slug
    pub route_base: String,
    /// Per-namespace route prefixes, overriding `route_base`
    pub routes: HashMap<String, String>,
    pub bind: SocketAddr,
    /// Route serving the index document
    pub endpoint: String,
    /// Remote index endpoint `search` queries when no `--url` is given; when
    /// unset, `search` indexes `content_dir` in process
    pub index_url: Option<String>,
    pub default_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            extension: "mdx".to_string(),
            route_base: "/posts".to_string(),
            routes: HashMap::new(),
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            endpoint: "/api/search-index".to_string(),
            index_url: None,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.content_dir = PathBuf::from(&*expand_tilde(&config.content_dir.to_string_lossy()));
        Ok(config)
    }

    /// Route prefix for a namespace.
    pub fn route_base_for(&self, namespace: &str) -> &str {
        self.routes
            .get(namespace)
            .map_or(self.route_base.as_str(), String::as_str)
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
