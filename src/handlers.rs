use crate::counters;
use crate::errors::AppError;
use crate::models::{
    AggregatedStats, ClickRequest, ClickResponse, ItemCountResponse, TodayStats, VisitResponse,
};
use crate::state::AppState;
use crate::stats::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

pub async fn record_visit(State(state): State<AppState>) -> Result<Json<VisitResponse>, AppError> {
    let (date, visits) = counters::increment_visit(&state).await?;
    Ok(Json(VisitResponse { date, visits }))
}

pub async fn record_click(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> Result<Json<ClickResponse>, AppError> {
    let item_id = payload.item_id.trim();
    if item_id.is_empty() {
        return Err(AppError::bad_request("item_id must not be empty"));
    }

    let clicks = counters::increment_item_click(&state, item_id).await?;
    Ok(Json(ClickResponse {
        item_id: item_id.to_string(),
        clicks,
    }))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayStats>, AppError> {
    let mut reader = state.reader.lock().await;
    Ok(Json(reader.today_stats().await))
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub days: Option<u32>,
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<AggregatedStats>, AppError> {
    let days = params.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(AppError::bad_request(format!(
            "days must be between 1 and {MAX_WINDOW_DAYS}"
        )));
    }

    let mut reader = state.reader.lock().await;
    Ok(Json(reader.aggregated_stats(days).await))
}

/// Current click count for one item. An unknown item reads as zero, not as
/// an error.
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<ItemCountResponse>, AppError> {
    let data = state.data.lock().await;
    let clicks = data.item_clicks.get(&item_id).copied().unwrap_or_default();
    Ok(Json(ItemCountResponse { item_id, clicks }))
}
