// src/main.rs
use axum::{extract::Extension, middleware, Router};
use dotenv::dotenv;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod common;
mod logging_middleware;
mod register;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::config::log_config_summary;
use common::{AppConfig, AppState};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = AppConfig::from_env()?;
    log_config_summary(&config);

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState::new(config);
    info!(
        form = %app_state.register_validator.form(),
        rules = app_state.register_validator.rules().len(),
        "Registration rules loaded"
    );

    let port = app_state.config.port;
    let app = build_app(app_state);

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// ============================================================================
// ROUTER COMPOSITION
// ============================================================================

pub(crate) fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);
    let shared = Arc::new(state);

    Router::new()
        .merge(register::register_routes())
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(shared))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    let origins: Vec<axum::http::HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([axum::http::Method::POST, axum::http::Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            logging_middleware::REQUEST_ID_HEADER,
        ])
        .allow_credentials(true)
}
