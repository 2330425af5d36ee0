//! Health Routes
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health/ready - Readiness check (store can produce its yearly total)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if check_store_health(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store_ok = check_store_health(&state).await;
    let subscriptions = state.store.read().await.len();

    Json(HealthResponse {
        status: if store_ok { "healthy" } else { "degraded" }.to_string(),
        store: if store_ok { "ok" } else { "error" }.to_string(),
        subscriptions,
        ws_connections: state.ws_connection_count().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// The store is usable when its yearly total fits a `Decimal`
///
/// Waits behind any in-flight mutation rather than reporting it as a failure.
async fn check_store_health(state: &AppState) -> bool {
    state
        .store
        .read()
        .await
        .checked_total_annual_cost()
        .is_some()
}
