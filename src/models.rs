use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw counter rows, persisted as a single JSON document.
///
/// Visits and clicks are kept as per-day totals keyed by ISO date
/// (`YYYY-MM-DD`); `item_clicks` additionally keeps a running total per
/// item so detail views can show a lifetime count. Rows are only ever
/// created or incremented, never rewritten or deleted here.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CounterData {
    pub visit_days: BTreeMap<String, u64>,
    pub click_days: BTreeMap<String, u64>,
    pub item_clicks: BTreeMap<String, u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClickRequest {
    pub item_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VisitResponse {
    pub date: String,
    pub visits: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClickResponse {
    pub item_id: String,
    pub clicks: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemCountResponse {
    pub item_id: String,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayStats {
    pub date: String,
    pub visits: u64,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub window_days: u32,
    pub start_date: String,
    pub end_date: String,
    pub total_visits: u64,
    pub total_clicks: u64,
}
