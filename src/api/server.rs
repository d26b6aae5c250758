//! HTTP server
//!
//! Sets up the axum router and serves it.

use axum::routing::get;
use axum::Router;
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::common::Result;
use crate::config::ServerConfig;
use crate::inspector::Inspector;

/// Build the application router with all routes
pub fn build_router(inspector: Arc<Inspector>) -> Router {
    Router::new()
        .route("/", get(handlers::certificate_expiry))
        .route("/check-ssl", get(handlers::check_ssl))
        .route("/health", get(handlers::health_check))
        .with_state(inspector)
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve
pub async fn start_server(config: &ServerConfig, inspector: Arc<Inspector>) -> Result<()> {
    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!("Server is listening on {}", listener.local_addr()?);

    serve(listener, inspector).await
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, inspector: Arc<Inspector>) -> Result<()> {
    axum::serve(listener, build_router(inspector)).await?;

    Ok(())
}
