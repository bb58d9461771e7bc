//! Content scanning: frontmatter, markdown cleanup and directory walking.

pub mod frontmatter;
pub mod markdown;
pub mod scanner;

pub use frontmatter::{Frontmatter, FrontmatterOutcome, SkipReason};
pub use scanner::{ContentScanner, ScanReport};
