//! # HTTP Facet
//!
//! An axum router carrying the same JSON-RPC messages as the stdio server.
//!
//! - `GET /health` reports liveness and the current employee count
//! - `POST /mcp` takes one JSON-RPC message; notifications get `202 Accepted`

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::mcp::McpServer;

/// Build the HTTP router over a server.
pub fn router(server: McpServer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mcp", post(mcp))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

async fn health(State(server): State<McpServer>) -> Json<Value> {
    let employees = server.directory().lock().await.len();
    Json(json!({ "status": "ok", "employees": employees }))
}

async fn mcp(State(server): State<McpServer>, body: String) -> Response {
    match server.handle_message(body.trim()).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve_http(server: McpServer, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP facet listening");

    axum::serve(listener, router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
