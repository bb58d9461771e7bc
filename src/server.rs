//! HTTP transport serving the cached index as a single JSON document.
//!
//! One read route returns `{ "index": [...] }` with the full corpus. There is no
//! pagination or filtering, which bounds this to small and medium sites.

use crate::cache::{IndexCache, SharedIndex};
use crate::error::Result;
use crate::types::IndexDocument;
use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Build the router exposing the index at `endpoint`.
pub fn router(cache: Arc<IndexCache>, endpoint: &str) -> Router {
    Router::new()
        .route(endpoint, get(serve_index))
        .with_state(cache)
}

async fn serve_index(State(cache): State<Arc<IndexCache>>) -> Response {
    match cache.get().await {
        Ok(index) => Json(IndexDocument::<SharedIndex> { index }).into_response(),
        Err(e) => {
            tracing::error!("Failed to build search index: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "search index unavailable" })),
            )
                .into_response()
        }
    }
}

/// A running transport server.
#[derive(Debug)]
pub struct ServerHandle {
    pub local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(self) -> Result<()> {
        self.shutdown.cancel();
        self.task
            .await
            .context("Server task panicked")?
            .context("Server terminated with an error")
    }
}

/// Bind `addr` and serve the index in a background task.
pub async fn spawn(cache: Arc<IndexCache>, addr: SocketAddr, endpoint: &str) -> Result<ServerHandle> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;

    let app = router(cache, endpoint);
    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { signal.cancelled().await })
            .await
    });

    tracing::info!(addr = %local_addr, endpoint, "Serving search index");

    Ok(ServerHandle {
        local_addr,
        shutdown,
        task,
    })
}

/// Serve until Ctrl-C.
pub async fn run(cache: Arc<IndexCache>, addr: SocketAddr, endpoint: &str) -> Result<()> {
    let handle = spawn(cache, addr, endpoint).await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutting down");

    handle.shutdown().await
}
