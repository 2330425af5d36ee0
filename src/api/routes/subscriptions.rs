//! Subscription Routes
//!
//! - GET /api/v1/subscriptions - List all subscriptions
//! - POST /api/v1/subscriptions - Add a subscription
//! - GET /api/v1/subscriptions/:id - Get a subscription
//! - DELETE /api/v1/subscriptions/:id - Remove a subscription

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::SubscriptionListResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::store::{NewSubscription, Subscription, SubscriptionId};

/// GET /api/v1/subscriptions
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SubscriptionListResponse>> {
    let store = state.store.read().await;

    Ok(Json(SubscriptionListResponse {
        subscriptions: store.subscriptions().to_vec(),
        total: store.len(),
        revision: store.revision(),
    }))
}

/// GET /api/v1/subscriptions/:id
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SubscriptionId>,
) -> ApiResult<Json<Subscription>> {
    let store = state.store.read().await;
    let subscription = store.get(id)?.clone();

    Ok(Json(subscription))
}

/// POST /api/v1/subscriptions
///
/// Rejected candidates (blank name, amount <= 0) answer 400 and leave
/// the collection unchanged.
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSubscription>,
) -> ApiResult<(StatusCode, Json<Subscription>)> {
    let subscription = state.add_subscription(req).await?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

/// DELETE /api/v1/subscriptions/:id
///
/// Removing an unknown id is not an error.
pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SubscriptionId>,
) -> StatusCode {
    state.remove_subscription(id).await;
    StatusCode::NO_CONTENT
}
