//! Summary Route
//!
//! - GET /api/v1/summary - Yearly cost of all subscriptions

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::SummaryResponse;
use crate::api::state::AppState;
use crate::store::Frequency;

/// GET /api/v1/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let store = state.store.read().await;
    let total_annual_cost = store.total_annual_cost();

    Json(SummaryResponse {
        count: store.len(),
        monthly_count: store.count_by_frequency(Frequency::Monthly),
        yearly_count: store.count_by_frequency(Frequency::Yearly),
        total_annual_cost,
        formatted_total: state.format_money(total_annual_cost),
        revision: store.revision(),
    })
}
