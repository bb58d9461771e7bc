//! YAML frontmatter parsing into a validated document record.

use serde::Deserialize;
use serde_yaml::Value;

const DELIMITER: &str = "---";

/// Metadata of a document that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub category: Option<String>,
}

/// Why a document was left out of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    /// `title` is present but not a non-empty string
    InvalidTitle,
}

/// Result of reading a document's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterOutcome<'a> {
    Document {
        frontmatter: Frontmatter,
        /// Source text following the closing delimiter
        body: &'a str,
    },
    Skip(SkipReason),
}

/// Untyped view of the YAML block. Optional fields tolerate wrong types by
/// treating them as absent; only `title` decides whether a document is kept.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFrontmatter {
    title: Option<Value>,
    description: Option<Value>,
    tags: Option<Value>,
    category: Option<Value>,
}

/// Split `source` into its YAML block and body.
///
/// Returns `None` when the file does not open with a `---` line or the block is
/// never closed.
pub fn split(source: &str) -> Option<(&str, &str)> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let (opening, rest) = source.split_once('\n')?;
    if opening.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// Parse the frontmatter of `source`.
///
/// Malformed YAML is an error; a missing or invalid title is a [`FrontmatterOutcome::Skip`].
pub fn parse(source: &str) -> Result<FrontmatterOutcome<'_>, serde_yaml::Error> {
    let Some((yaml, body)) = split(source) else {
        return Ok(FrontmatterOutcome::Skip(SkipReason::MissingTitle));
    };

    let raw: RawFrontmatter = if yaml.trim().is_empty() {
        RawFrontmatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };

    let title = match raw.title {
        None | Some(Value::Null) => return Ok(FrontmatterOutcome::Skip(SkipReason::MissingTitle)),
        Some(Value::String(title)) if !title.trim().is_empty() => title,
        Some(_) => return Ok(FrontmatterOutcome::Skip(SkipReason::InvalidTitle)),
    };

    Ok(FrontmatterOutcome::Document {
        frontmatter: Frontmatter {
            title,
            description: raw.description.and_then(into_string),
            tags: raw.tags.map(into_tags).unwrap_or_default(),
            category: raw.category.and_then(into_string),
        },
        body,
    })
}

fn into_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Accepts a sequence of strings or a single comma-separated string.
fn into_tags(value: Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.into_iter().filter_map(into_string).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
