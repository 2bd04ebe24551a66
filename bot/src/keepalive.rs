//! Keep-Alive Endpoint
//!
//! Minimal HTTP listener so hosting platforms that probe a port keep the bot
//! process running.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Build the keep-alive router.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

async fn root() -> &'static str {
    "Alive"
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Serve the keep-alive router on `address` in a background task.
pub async fn spawn(address: &str) -> std::io::Result<tokio::task::JoinHandle<()>> {
    let listener = TcpListener::bind(address).await?;
    info!(address = %listener.local_addr()?, "Keep-alive server listening");

    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router()).await {
            error!(error = %e, "Keep-alive server stopped");
        }
    }))
}
