//! Shared test fixtures for integration tests.
//!
//! [`TempWorkspace`] provides a throwaway content root. The `sample_site` fixture
//! lays out a small two-namespace site used by the scan, transport and search tests.

use mdx_search::{ContentScanner, IndexCache};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary directory that is removed when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a directory (and all parent directories) within this workspace.
    pub fn create_dir(&self, path: &str) {
        let full_path = self.root.join(path);
        std::fs::create_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("Failed to create directory '{}': {}", path, e));
    }

    /// Creates a file with the given content, creating parent directories as needed.
    pub fn create_file(&self, path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Writes an MDX document with the given frontmatter lines and body.
    pub fn create_doc(&self, path: &str, frontmatter: &str, body: &str) {
        self.create_file(path, format!("---\n{}\n---\n{}", frontmatter.trim(), body));
    }

    pub fn scanner(&self) -> ContentScanner {
        ContentScanner::new(self.path())
    }

    pub fn cache(&self) -> Arc<IndexCache> {
        Arc::new(IndexCache::new(self.scanner()))
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A small site with a `blog` and a `notes` namespace.
///
/// Scan order: blog/getting-started, blog/guides/deploy, notes/rust.
/// `blog/draft.mdx` has no title and `notes/broken.mdx` has malformed YAML; both
/// are left out of the index.
#[fixture]
pub fn sample_site() -> TempWorkspace {
    let site = TempWorkspace::new();

    site.create_doc(
        "blog/getting-started.mdx",
        "title: Getting Started\ndescription: First steps with the site\ntags: [intro, setup]",
        "\n# Getting Started\n\nWelcome! Read the [docs](/docs).\n\n## Setup Guide\n\n```bash\nnpm install\n```\n\n- install deps\n- run **dev** server\n",
    );
    site.create_doc(
        "blog/guides/deploy.mdx",
        "title: Deploying\ncategory: ops\ntags: [hosting]",
        "\n## Build\n\nRun the build.\n\n## Setup DNS\n\nPoint records at the host.\n",
    );
    site.create_doc("blog/draft.mdx", "description: untitled draft", "nothing here");
    site.create_doc(
        "notes/rust.mdx",
        "title: Rust Notes",
        "\nOwnership and `borrowing` notes. Setup is easy.\n",
    );
    site.create_doc("notes/broken.mdx", "title: [unclosed", "body");
    site.create_file("notes/readme.md", "---\ntitle: Not MDX\n---\n");

    site
}
