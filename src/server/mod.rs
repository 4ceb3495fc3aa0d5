//! HTTP surface of the detection service

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use crate::config::AppConfig;
use anyhow::{Context, Result};
use router::build_routes;
use state::AppState;

/// Bind the configured address and serve until ctrl-c
pub async fn listen(config: &AppConfig, state: AppState) -> Result<()> {
    let addr = config.listen_addr();
    let app = build_routes(state, &config.server.cors_allowed_origins)?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening at {}", addr);

    tokio::select! {
        r = axum::serve(listener, app) => {
            tracing::warn!("server ended unexpectedly: {:?}", &r)
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl+c interrupt, closing server");
        }
    }
    Ok(())
}
