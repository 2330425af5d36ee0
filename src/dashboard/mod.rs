//! Subtrack Dashboard
//!
//! Server-rendered HTML front end built with Leptos components. Forms post back to the server and every
//! successful mutation redirects to `/`, so the page always re-reads the
//! store after a change.
//!
//! - `GET /` - Dashboard page
//! - `POST /subscriptions` - Add form submission
//! - `POST /subscriptions/:id/delete` - Delete button

pub mod render;

pub use render::{render_page, DashboardView, DraftForm};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;

use crate::api::AppState;
use crate::store::SubscriptionId;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render(&state, DraftForm::default(), None).await)
}

/// POST /subscriptions
///
/// On success the form is reset via redirect; a refused candidate re-renders
/// the page with the draft kept and an inline message.
pub async fn submit(State(state): State<Arc<AppState>>, Form(draft): Form<DraftForm>) -> Response {
    let result = match draft.to_candidate() {
        Ok(candidate) => state.add_subscription(candidate).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Dashboard add refused");
            let page = render(&state, draft, Some(e.to_string())).await;
            (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
        }
    }
}

/// POST /subscriptions/:id/delete
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SubscriptionId>,
) -> Redirect {
    state.remove_subscription(id).await;
    Redirect::to("/")
}

async fn render(state: &AppState, draft: DraftForm, error: Option<String>) -> String {
    render_page(DashboardView {
        title: state.dashboard.title.clone(),
        currency_symbol: state.dashboard.currency_symbol.clone(),
        snapshot: state.snapshot().await,
        draft,
        error,
    })
}
