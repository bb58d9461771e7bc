mod common;

use assert2::check;
use common::{TempWorkspace, sample_site};
use mdx_search::server;
use mdx_search::{HttpIndexSource, IndexLoader, SearchEngine};
use rstest::rstest;
use std::net::SocketAddr;
use std::sync::Arc;

const ENDPOINT: &str = "/api/search-index";

fn any_port() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

#[rstest]
#[tokio::test]
async fn serves_full_index_document(sample_site: TempWorkspace) {
    let handle = server::spawn(sample_site.cache(), any_port(), ENDPOINT)
        .await
        .unwrap();
    let url = format!("http://{}{}", handle.local_addr, ENDPOINT);

    let body: serde_json::Value = reqwest::get(&url).await.unwrap().json().await.unwrap();
    let index = body["index"].as_array().unwrap();
    check!(index.len() == 3);
    check!(index[0]["title"] == "Getting Started");
    check!(index[0]["headings"][1]["id"] == "setup-guide");
    // Absent optional fields are omitted
    check!(index[2].get("description").is_none());

    handle.shutdown().await.unwrap();
}

#[rstest]
#[tokio::test]
async fn http_loader_searches_served_index(sample_site: TempWorkspace) {
    let handle = server::spawn(sample_site.cache(), any_port(), ENDPOINT)
        .await
        .unwrap();
    let source = HttpIndexSource::new(format!("http://{}{}", handle.local_addr, ENDPOINT)).unwrap();
    let engine = SearchEngine::new(IndexLoader::new(Arc::new(source)));

    let results = engine.perform_search("deploy", 10).await.unwrap();
    check!(results.len() == 1);
    check!(results[0].path.as_deref() == Some("/posts/guides/deploy"));
    check!(engine.is_index_loaded());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn unreachable_endpoint_yields_no_results() {
    // Bind then release a port so nothing is listening on it
    let listener = tokio::net::TcpListener::bind(any_port()).await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpIndexSource::new(format!("http://{}{}", addr, ENDPOINT)).unwrap();
    let engine = SearchEngine::new(IndexLoader::new(Arc::new(source)));

    let results = engine.perform_search("anything", 10).await.unwrap();
    check!(results.is_empty());
    check!(!engine.is_index_loaded());
    check!(!engine.loader().is_loading());
}

#[tokio::test]
async fn unreadable_content_root_is_a_server_error() {
    let site = TempWorkspace::new();
    let cache = Arc::new(mdx_search::IndexCache::new(mdx_search::ContentScanner::new(
        site.path().join("missing"),
    )));
    let handle = server::spawn(cache, any_port(), ENDPOINT).await.unwrap();

    let response = reqwest::get(format!("http://{}{}", handle.local_addr, ENDPOINT))
        .await
        .unwrap();
    check!(response.status() == reqwest::StatusCode::INTERNAL_SERVER_ERROR);

    let source = HttpIndexSource::new(format!("http://{}{}", handle.local_addr, ENDPOINT)).unwrap();
    let loader = IndexLoader::new(Arc::new(source));
    check!(loader.load().await.is_empty());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn other_routes_are_not_found() {
    let site = TempWorkspace::new();
    site.create_dir("blog");
    let handle = server::spawn(site.cache(), any_port(), ENDPOINT).await.unwrap();

    let response = reqwest::get(format!("http://{}/api/other", handle.local_addr))
        .await
        .unwrap();
    check!(response.status() == reqwest::StatusCode::NOT_FOUND);

    handle.shutdown().await.unwrap();
}
