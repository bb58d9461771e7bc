//! Content directory scanning into index items.

use super::frontmatter::{self, FrontmatterOutcome};
use super::markdown::{clean_content, extract_headings};
use crate::config::Config;
use crate::error::ScanError;
use crate::types::SearchIndexItem;
use ignore::WalkBuilder;
use std::fs::DirEntry;
use std::path::{Component, Path, PathBuf};

/// Per-namespace outcome counters, logged when a namespace finishes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub indexed: usize,
    /// Documents dropped for a missing or invalid title
    pub skipped: usize,
    /// Documents that could not be read or parsed
    pub failed: usize,
}

impl std::ops::AddAssign for ScanReport {
    fn add_assign(&mut self, other: Self) {
        self.indexed += other.indexed;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Outcome of processing a single file.
enum FileOutcome {
    Indexed(SearchIndexItem),
    Skipped,
}

/// Reads content files and turns them into [`SearchIndexItem`]s.
///
/// Each immediate subdirectory of the root is an independent namespace. A file
/// that fails to read or parse is logged and skipped; it never aborts the scan.
#[derive(Debug, Clone)]
pub struct ContentScanner {
    config: Config,
}

impl ContentScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config: Config {
                content_dir: root.into(),
                ..Config::default()
            },
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    #[must_use]
    pub fn with_route_base(mut self, route_base: impl Into<String>) -> Self {
        self.config.route_base = route_base.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.config.content_dir
    }

    /// Namespace directories under the root, sorted by name.
    ///
    /// Only an unreadable root is an error. Entries that cannot be inspected are
    /// logged and left out; dot-prefixed directories are not namespaces.
    pub fn namespaces(&self) -> std::io::Result<Vec<(String, PathBuf)>> {
        let mut namespaces: Vec<_> = std::fs::read_dir(self.root())?
            .filter_map(namespace_entry)
            .collect();
        namespaces.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(namespaces)
    }

    /// Scan every namespace in order and concatenate their items.
    ///
    /// Only an unreadable root is an error; per-file failures are skipped.
    pub fn scan(&self) -> std::io::Result<(Vec<SearchIndexItem>, ScanReport)> {
        let mut items = Vec::new();
        let mut total = ScanReport::default();

        for (namespace, dir) in self.namespaces()? {
            let report = self.scan_namespace(&namespace, &dir, &mut items);
            tracing::info!(
                namespace = %namespace,
                indexed = report.indexed,
                skipped = report.skipped,
                failed = report.failed,
                "Scanned namespace"
            );
            total += report;
        }

        Ok((items, total))
    }

    /// Scan one namespace directory, appending its items in file-enumeration order.
    pub fn scan_namespace(
        &self,
        namespace: &str,
        dir: &Path,
        items: &mut Vec<SearchIndexItem>,
    ) -> ScanReport {
        let mut report = ScanReport::default();

        // Every document counts: no hidden-file or gitignore filtering
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(namespace = %namespace, "Failed to walk content entry: {}", e);
                    report.failed += 1;
                    continue;
                }
            };

            let path = entry.path();
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if !is_file || !self.has_content_extension(path) {
                continue;
            }

            match self.scan_file(namespace, dir, path) {
                Ok(FileOutcome::Indexed(item)) => {
                    report.indexed += 1;
                    items.push(item);
                }
                Ok(FileOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    tracing::warn!(namespace = %namespace, "Skipping document: {}", e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    fn has_content_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.config.extension)
    }

    fn scan_file(
        &self,
        namespace: &str,
        namespace_dir: &Path,
        path: &Path,
    ) -> Result<FileOutcome, ScanError> {
        let source = std::fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let outcome = frontmatter::parse(&source).map_err(|source| ScanError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

        let (frontmatter, body) = match outcome {
            FrontmatterOutcome::Document { frontmatter, body } => (frontmatter, body),
            FrontmatterOutcome::Skip(reason) => {
                tracing::debug!(path = %path.display(), ?reason, "Document left out of index");
                return Ok(FileOutcome::Skipped);
            }
        };

        let route_base = self.config.route_base_for(namespace);

        Ok(FileOutcome::Indexed(SearchIndexItem {
            title: frontmatter.title,
            description: frontmatter.description,
            path: document_path(route_base, namespace_dir, path),
            category: frontmatter.category.or_else(|| Some(namespace.to_string())),
            tags: frontmatter.tags,
            content: Some(clean_content(body)),
            headings: extract_headings(body),
        }))
    }
}

/// Name and path of a root entry when it is a namespace directory.
fn namespace_entry(entry: std::io::Result<DirEntry>) -> Option<(String, PathBuf)> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
            tracing::warn!("Failed to read content root entry: {}", e);
            return None;
        }
    };
    match entry.file_type() {
        Ok(file_type) if file_type.is_dir() => {}
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!(path = %entry.path().display(), "Failed to inspect content root entry: {}", e);
            return None;
        }
    }
    let name = entry.file_name().to_string_lossy().into_owned();
    if name.starts_with('.') {
        return None;
    }
    Some((name, entry.path()))
}

/// Slug of `file` relative to its namespace root: extension stripped, separators
/// normalized to `/`.
pub fn slug(namespace_dir: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(namespace_dir).unwrap_or(file);
    let relative = relative.with_extension("");
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Route of a document under `route_base`.
pub fn document_path(route_base: &str, namespace_dir: &Path, file: &Path) -> String {
    format!(
        "{}/{}",
        route_base.trim_end_matches('/'),
        slug(namespace_dir, file)
    )
}
