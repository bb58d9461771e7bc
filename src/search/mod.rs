//! Query engine: additive relevance scoring, ranking and heading deep-links.

pub mod engine;
pub mod scoring;

pub use engine::SearchEngine;
pub use scoring::{Query, find_heading, rank, score_item};
