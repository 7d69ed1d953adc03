//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use storefront_core::config::{AppConfig, CorsConfig};
use storefront_core::error::{AppError, ErrorKind};

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Runs the Storefront server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!(
        provider = %config.database.provider,
        "Starting Storefront server"
    );

    let store = storefront_database::connect_store(&config.database).await?;
    let cors = config.server.cors.clone();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState::new(config, store)?;
    let app = build_app(state, &cors);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    info!(addr = %addr, "Storefront server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("Storefront server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
