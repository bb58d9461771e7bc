mod common;

use assert2::check;
use common::{TempWorkspace, sample_site};
use mdx_search::{LocalIndexSource, SearchEngine, SearchSession};
use rstest::rstest;
use std::sync::Arc;

fn local_engine(site: &TempWorkspace) -> SearchEngine {
    SearchEngine::from_source(Arc::new(LocalIndexSource::new(site.cache())))
}

#[rstest]
#[tokio::test]
async fn heading_matches_deep_link(sample_site: TempWorkspace) {
    let engine = local_engine(&sample_site);

    let results = engine.perform_search("setup", 10).await.unwrap();
    let paths: Vec<_> = results.iter().filter_map(|r| r.path.as_deref()).collect();

    // Tag hit (40) + content (10) outranks the content-only matches (10 each)
    check!(
        paths
            == vec![
                "/posts/getting-started#setup-guide",
                "/posts/guides/deploy#setup-dns",
                "/posts/rust",
            ]
    );
    check!(results[0].score == 50);
    check!(results[0].heading_text.as_deref() == Some("Setup Guide"));
    check!(results[2].heading_id.is_none());
}

#[rstest]
#[tokio::test]
async fn category_defaults_feed_scoring(sample_site: TempWorkspace) {
    let engine = local_engine(&sample_site);

    let results = engine.perform_search("notes", 10).await.unwrap();
    check!(results.len() == 1);
    // Title contains (60) + namespace category (20) + content (10)
    check!(results[0].score == 90);
}

#[rstest]
#[tokio::test]
async fn code_blocks_are_not_searchable(sample_site: TempWorkspace) {
    let engine = local_engine(&sample_site);
    check!(engine.perform_search("npm install", 10).await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn cleared_index_picks_up_new_content(sample_site: TempWorkspace) {
    let cache = sample_site.cache();
    let engine = SearchEngine::from_source(Arc::new(LocalIndexSource::new(cache.clone())));
    check!(engine.perform_search("kubernetes", 10).await.unwrap().is_empty());

    sample_site.create_doc("blog/k8s.mdx", "title: Kubernetes", "clusters");
    cache.clear().await;
    engine.clear_index_cache();

    let results = engine.perform_search("kubernetes", 10).await.unwrap();
    check!(results.len() == 1);
    // Case differs from the title, so a prefix match rather than exact
    check!(results[0].score == 80);
}

#[rstest]
#[tokio::test]
async fn session_runs_against_local_index(sample_site: TempWorkspace) {
    let session = SearchSession::new(Arc::new(local_engine(&sample_site)));

    session.start().await.unwrap();
    check!(!session.state().index_loading);

    session.set_query("deploy");
    session.search("deploy").await;

    let state = session.state();
    check!(state.query == "deploy");
    check!(state.results.len() == 1);
    check!(state.results[0].title == "Deploying");
    check!(!state.loading);
    check!(state.error.is_none());
}
