//! Index and result records shared by the scanner, transport and query engine.

use serde::{Deserialize, Serialize};

/// One entry in a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// ATX level, 1 through 6
    pub level: u8,
    /// Heading text with markdown links reduced to their labels
    pub text: String,
    /// Anchor id derived from `text` (see [`crate::content::markdown::heading_id`])
    pub id: String,
}

/// Searchable record for a single content document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical route to the document
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Markdown-stripped plain text of the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<Heading>,
}

impl SearchIndexItem {
    /// Create an item carrying only the required fields.
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            path: path.into(),
            category: None,
            tags: Vec::new(),
            content: None,
            headings: Vec::new(),
        }
    }
}

/// Wire envelope served by the index endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDocument<T = Vec<SearchIndexItem>> {
    pub index: T,
}

/// Kind of a ranked result. Only blog documents are indexed today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    #[default]
    Blog,
}

/// A ranked match for one query. Built per query and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: ResultType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Document route, with `#<headingId>` appended when a heading matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_text: Option<String>,
    pub score: u32,
}
