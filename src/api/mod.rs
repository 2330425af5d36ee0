//! Subtrack HTTP Server
//!
//! JSON API, dashboard page and health checks, built with Axum.
//!
//! # Endpoints
//!
//! ## Subscriptions
//! - `GET /api/v1/subscriptions` - List all subscriptions
//! - `POST /api/v1/subscriptions` - Add a subscription
//! - `GET /api/v1/subscriptions/:id` - Get a subscription
//! - `DELETE /api/v1/subscriptions/:id` - Remove a subscription
//!
//! ## Summary
//! - `GET /api/v1/summary` - Yearly cost across all subscriptions
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Snapshot after every mutation
//!
//! ## Dashboard
//! - `GET /` - HTML dashboard
//! - `POST /subscriptions` - Add form
//! - `POST /subscriptions/:id/delete` - Delete button
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,no_run
//! use subtrack::api::{serve, AppState};
//! use subtrack::config::{ApiConfig, DashboardConfig};
//! use subtrack::store::SubscriptionStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::new(SubscriptionStore::with_defaults(), DashboardConfig::default());
//!     serve(state, &ApiConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::dashboard;
use crate::websocket::websocket_handler;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/subscriptions",
            get(routes::subscriptions::list_subscriptions)
                .post(routes::subscriptions::create_subscription),
        )
        .route(
            "/subscriptions/:id",
            get(routes::subscriptions::get_subscription)
                .delete(routes::subscriptions::delete_subscription),
        )
        .route("/summary", get(routes::summary::get_summary))
        .route("/ws", get(websocket_handler));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let dashboard_routes = Router::new()
        .route("/", get(dashboard::index))
        .route("/subscriptions", post(dashboard::submit))
        .route("/subscriptions/:id/delete", post(dashboard::delete));

    let shared_state = Arc::new(state);

    Router::new()
        .merge(dashboard_routes)
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Subtrack listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Subtrack shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
