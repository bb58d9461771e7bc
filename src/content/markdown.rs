//! Markdown text utilities: outline extraction, heading anchors and plain-text cleaning.
//!
//! These are regex approximations over the raw source, not a markdown parser. They
//! strip the classes of markup that would otherwise pollute substring matching
//! (code, links, images, headings, lists, quotes, emphasis).

use crate::types::Heading;
use regex::Regex;
use std::sync::LazyLock;

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

/// Runs of anything other than ASCII lowercase alphanumerics and CJK ideographs.
static ID_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\u{4e00}-\u{9fa5}]+").unwrap());

/// Ordered stripping passes applied by [`clean_content`].
static CLEANING_PASSES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Frontmatter remnants
        (r"(?s)\A\s*---.*?---", ""),
        // Fenced code blocks
        (r"(?s)```.*?```", ""),
        // Inline code
        (r"`[^`\n]*`", ""),
        // Images
        (r"!\[[^\]]*\]\([^)]*\)", ""),
        // Links keep their label
        (r"\[([^\]]*)\]\([^)]*\)", "$1"),
        // HTML and JSX tags
        (r"<[^>]+>", ""),
        (r"(?m)^[ \t]*#{1,6}[ \t]+", ""),
        // Bulleted and numbered list markers
        (r"(?m)^[ \t]*[-*+][ \t]+", ""),
        (r"(?m)^[ \t]*\d+\.[ \t]+", ""),
        (r"(?m)^[ \t]*>[ \t]?", ""),
        // Emphasis, strongest first
        (r"\*\*\*([^*]+)\*\*\*", "$1"),
        (r"\*\*([^*]+)\*\*", "$1"),
        (r"__([^_]+)__", "$1"),
        (r"\*([^*\n]+)\*", "$1"),
        (r"\b_([^_\n]+)_\b", "$1"),
        (r"~~([^~]+)~~", "$1"),
        (r"\s+", " "),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Derive an anchor id from heading text.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` and the CJK
/// ideograph block into a single `-`, then trims boundary hyphens. Pure: equal
/// text always yields an equal id, so duplicate headings in one document share it.
pub fn heading_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    ID_SEPARATOR
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Reduce `[label](url)` links to `label`.
pub fn strip_links(text: &str) -> String {
    LINK.replace_all(text, "$1").into_owned()
}

/// Extract the document outline from a markdown body, one heading per matching line.
pub fn extract_headings(body: &str) -> Vec<Heading> {
    body.lines()
        .filter_map(|line| {
            let captures = HEADING_LINE.captures(line.trim_end())?;
            let level = u8::try_from(captures[1].len()).ok()?;
            let text = strip_links(&captures[2]).trim().to_string();
            if text.is_empty() {
                return None;
            }
            let id = heading_id(&text);
            Some(Heading { level, text, id })
        })
        .collect()
}

/// Convert a markdown body into whitespace-normalized plain text.
pub fn clean_content(body: &str) -> String {
    let mut text = body.to_string();
    for (pattern, replacement) in CLEANING_PASSES.iter() {
        if let std::borrow::Cow::Owned(replaced) = pattern.replace_all(&text, *replacement) {
            text = replaced;
        }
    }
    text.trim().to_string()
}
