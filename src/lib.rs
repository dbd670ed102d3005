//! Waitline -- an in-memory waiting line with a priority fast lane.
//!
//! This crate provides the queue core (clients, 1-based positions, the 2:1
//! priority rotation policy) and the HTTP API that exposes it.

pub mod api;
pub mod queue;

use anyhow::Result;

use crate::api::state::AppState;

/// Start the waitline HTTP server on the given bind address.
pub async fn serve(bind: &str) -> Result<()> {
    let state = AppState::new();
    let app = api::router(state);

    let addr: std::net::SocketAddr = bind.parse()?;
    tracing::info!(%addr, "waitline listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
