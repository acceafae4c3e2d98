//! HTTP front for the weather gateway.
//!
//! Exposes the routes the web pages call:
//! - `GET /api/v1/weather?q=...` current conditions
//! - `GET /api/v1/getForecast?q=...` multi-day forecast
//! - `GET /api/v1/weather/{operation}?q=...` any gateway operation by name
//!
//! Responses are the provider documents, unmodified.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use weather_core::Config;

pub mod error;
pub mod routes;
pub mod state;

use routes::{forecast_handler, health_handler, operation_handler, weather_handler};
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/v1/weather", get(weather_handler))
        .route("/api/v1/getForecast", get(forecast_handler))
        .route("/api/v1/weather/{operation}", get(operation_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(config: Config) -> Result<()> {
    if !config.is_configured() {
        // Requests will fail upstream with an authentication error.
        tracing::warn!("No WeatherAPI key configured");
    }

    let state = AppState::from_config(&config.provider).context("Failed to build weather gateway")?;
    let app = router(state);

    let address = config.server.listen;
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                error!("Failed to install Ctrl+C handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
