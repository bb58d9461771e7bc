//! Local search for MDX content sites.
//!
//! Content files are scanned into a flat index ([`content`]), cached for the life of
//! the process ([`cache`]) and served as one JSON document ([`server`]). Clients load
//! that document once ([`loader`]) and rank it against free-text queries
//! ([`search`]); [`session`] wraps the engine in the state a UI binds to.

pub mod cache;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod loader;
pub mod search;
pub mod server;
pub mod session;
pub mod tracing;
pub mod types;

pub use cache::{IndexCache, SharedIndex};
pub use config::Config;
pub use content::ContentScanner;
pub use loader::{HttpIndexSource, IndexLoader, IndexSource, LocalIndexSource};
pub use search::SearchEngine;
pub use session::{SearchBackend, SearchSession, SessionState};
pub use types::{Heading, SearchIndexItem, SearchResult};
