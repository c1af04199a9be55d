//! Server-side increment operations.
//!
//! Each operation mutates exactly one set of counter rows under the state
//! lock, persists the file, and then publishes a change event. Increments
//! saturate instead of wrapping.

use crate::errors::AppError;
use crate::feed::ChangeEvent;
use crate::state::AppState;
use crate::storage::persist_data;
use chrono::Local;

/// Adds one visit to today's row, creating the row at 1 if absent.
/// Returns the date key and the updated count.
pub async fn increment_visit(state: &AppState) -> Result<(String, u64), AppError> {
    let date = today_key();
    let mut data = state.data.lock().await;
    let updated = {
        let entry = data.visit_days.entry(date.clone()).or_default();
        *entry = entry.saturating_add(1);
        *entry
    };

    persist_data(&state.data_path, &data).await?;
    drop(data);

    state.feed.publish(ChangeEvent::Visits);
    Ok((date, updated))
}

/// Adds one click to the named item and to today's click row. No dedup:
/// every call counts, unlike visits.
pub async fn increment_item_click(state: &AppState, item_id: &str) -> Result<u64, AppError> {
    let date = today_key();
    let mut data = state.data.lock().await;
    let updated = {
        let day = data.click_days.entry(date).or_default();
        *day = day.saturating_add(1);
        let entry = data.item_clicks.entry(item_id.to_string()).or_default();
        *entry = entry.saturating_add(1);
        *entry
    };

    persist_data(&state.data_path, &data).await?;
    drop(data);

    state.feed.publish(ChangeEvent::Clicks);
    Ok(updated)
}

pub fn today_key() -> String {
    Local::now().date_naive().to_string()
}
