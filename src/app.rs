use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/visits", post(handlers::record_visit))
        .route("/api/clicks", post(handlers::record_click))
        .route("/api/stats/today", get(handlers::get_today))
        .route("/api/stats/summary", get(handlers::get_summary))
        .route("/api/items/:item_id", get(handlers::get_item))
        .with_state(state)
}
