//! HTTP transport for the generator service
//!
//! Binds the axum router built by `pitchcraft::server` and serves until the
//! process receives Ctrl-C.

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};

use pitchcraft::{
    config::Config,
    pipeline_from_config,
    server::{AppState, build_router},
};

/// Start the HTTP server
pub async fn start_http_server(config: Config, bind: Option<SocketAddr>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or(config.server.bind);
    let pipeline = pipeline_from_config(&config)?;
    let model = config.completion.model.clone();
    let state = AppState::new(pipeline, Arc::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", bind))?;

    tracing::info!("Starting HTTP server on {} (model {})", bind, model);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
