//! Relevance scoring and ranking.
//!
//! Scores are additive integers over independent signals. Each signal counts at
//! most once per item, and only the title signals are mutually exclusive.

use crate::types::{Heading, ResultType, SearchIndexItem, SearchResult};

pub const TITLE_EXACT: u32 = 100;
pub const TITLE_PREFIX: u32 = 80;
pub const TITLE_CONTAINS: u32 = 60;
pub const DESCRIPTION: u32 = 30;
pub const TAG: u32 = 40;
pub const CATEGORY: u32 = 20;
pub const CONTENT: u32 = 10;

/// A query prepared for repeated matching.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    raw: &'a str,
    lower: String,
}

impl<'a> Query<'a> {
    /// Returns `None` for a blank query.
    pub fn new(raw: &'a str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self {
            raw,
            lower: raw.to_lowercase(),
        })
    }

    fn found_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.lower)
    }
}

/// Title signal:
/// - 100: Exact, case-sensitive match
/// - 80: Title starts with query (case-insensitive)
/// - 60: Title contains query (case-insensitive)
pub fn title_score(title: &str, query: &Query<'_>) -> u32 {
    if title == query.raw {
        return TITLE_EXACT;
    }
    let title = title.to_lowercase();
    if title.starts_with(&query.lower) {
        TITLE_PREFIX
    } else if title.contains(&query.lower) {
        TITLE_CONTAINS
    } else {
        0
    }
}

/// Total score of `item`. Zero means no match.
pub fn score_item(item: &SearchIndexItem, query: &Query<'_>) -> u32 {
    let mut score = title_score(&item.title, query);

    if item.description.as_deref().is_some_and(|d| query.found_in(d)) {
        score += DESCRIPTION;
    }
    if item.tags.iter().any(|tag| query.found_in(tag)) {
        score += TAG;
    }
    if item.category.as_deref().is_some_and(|c| query.found_in(c)) {
        score += CATEGORY;
    }
    if item.content.as_deref().is_some_and(|c| query.found_in(c)) {
        score += CONTENT;
    }

    score
}

/// First heading, in document order, whose text contains the query.
pub fn find_heading<'h>(headings: &'h [Heading], query: &Query<'_>) -> Option<&'h Heading> {
    headings.iter().find(|heading| query.found_in(&heading.text))
}

fn to_result(item: &SearchIndexItem, score: u32, query: &Query<'_>) -> SearchResult {
    let heading = find_heading(&item.headings, query);
    let path = match heading {
        Some(heading) => format!("{}#{}", item.path, heading.id),
        None => item.path.clone(),
    };

    SearchResult {
        kind: ResultType::Blog,
        title: item.title.clone(),
        description: item.description.clone(),
        path: Some(path),
        tags: item.tags.clone(),
        category: item.category.clone(),
        heading_id: heading.map(|h| h.id.clone()),
        heading_text: heading.map(|h| h.text.clone()),
        score,
    }
}

/// Score every item, drop non-matches, and return the top `limit` by score.
///
/// Equal scores keep index order.
pub fn rank(index: &[SearchIndexItem], query: &str, limit: usize) -> Vec<SearchResult> {
    let Some(query) = Query::new(query) else {
        return Vec::new();
    };

    let mut matches: Vec<(usize, u32)> = index
        .iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let score = score_item(item, &query);
            (score > 0).then_some((position, score))
        })
        .collect();

    // Stable: ties stay in index order
    matches.sort_by(|(_, a), (_, b)| b.cmp(a));

    matches
        .into_iter()
        .take(limit)
        .map(|(position, score)| to_result(&index[position], score, &query))
        .collect()
}
