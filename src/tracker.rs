//! Client-side visit tracking.
//!
//! A page view should count at most once per calendar day per session, even
//! though the surrounding application fires the recorder on every mount and
//! navigation. The dedup state lives only in the session; losing it merely
//! risks one extra increment, never corruption. Item clicks are the
//! opposite: every click counts, no dedup.

use crate::errors::TrackError;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::warn;

pub const DEFAULT_PAGE_KEY: &str = "home";

/// Remote increment procedures the tracker depends on. Implementations are
/// assumed atomic server-side; the tracker never inspects failure subtypes.
#[async_trait]
pub trait CounterApi: Send + Sync {
    async fn increment_visit(&self) -> Result<(), TrackError>;
    async fn increment_item_click(&self, item_id: &str) -> Result<(), TrackError>;
}

/// Injected dedup state, so tests can swap in a fake. Both operations are
/// infallible: any underlying failure reads as "nothing recorded".
pub trait DedupStore: Send {
    fn has_recorded(&self, date: NaiveDate, page_key: &str) -> bool;
    fn mark_recorded(&mut self, date: NaiveDate, page_key: &str);
}

/// Session-scoped dedup store holding one serialized record shaped as
/// `{ "YYYY-MM-DD": ["page", ...] }`. Marking a page under a new date
/// replaces the whole record, so only the current date's entries survive
/// and the payload never grows across days. A corrupt payload reads as
/// empty.
#[derive(Default)]
pub struct SessionDedupStore {
    slot: Option<String>,
}

impl SessionDedupStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse(&self) -> BTreeMap<String, Vec<String>> {
        let Some(payload) = &self.slot else {
            return BTreeMap::new();
        };
        match serde_json::from_str(payload) {
            Ok(record) => record,
            Err(err) => {
                warn!("discarding corrupt dedup record: {err}");
                BTreeMap::new()
            }
        }
    }

    /// Raw serialized record, exposed for inspection.
    pub fn payload(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Seeds the serialized slot, e.g. from a prior session snapshot.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            slot: Some(payload.into()),
        }
    }
}

impl DedupStore for SessionDedupStore {
    fn has_recorded(&self, date: NaiveDate, page_key: &str) -> bool {
        self.parse()
            .get(&date.to_string())
            .is_some_and(|pages| pages.iter().any(|page| page == page_key))
    }

    fn mark_recorded(&mut self, date: NaiveDate, page_key: &str) {
        let record = self.parse();
        let key = date.to_string();
        let mut pages = record.get(&key).cloned().unwrap_or_default();
        if !pages.iter().any(|page| page == page_key) {
            pages.push(page_key.to_string());
        }

        // Single-date window: entries for any other date are dropped.
        let mut next = BTreeMap::new();
        next.insert(key, pages);
        if let Ok(payload) = serde_json::to_string(&next) {
            self.slot = Some(payload);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The remote counter was incremented and the page marked recorded.
    Recorded,
    /// Already attempted on this instance or already recorded today.
    Duplicate,
    /// The remote call failed; the page stays unmarked so a later mount
    /// retries.
    Failed,
}

/// Records one page visit at most once per day per session.
///
/// One recorder per mount; the store is shared across recorders in the
/// same session. The store check is not atomic across concurrent
/// recorders, so two mounts racing the same page can produce one extra
/// increment. Accepted: this is approximate analytics.
pub struct VisitRecorder {
    page_key: String,
    store: Arc<Mutex<dyn DedupStore>>,
    api: Arc<dyn CounterApi>,
    attempted: bool,
}

impl VisitRecorder {
    pub fn new(
        page_key: Option<&str>,
        store: Arc<Mutex<dyn DedupStore>>,
        api: Arc<dyn CounterApi>,
    ) -> Self {
        Self {
            page_key: page_key.unwrap_or(DEFAULT_PAGE_KEY).to_string(),
            store,
            api,
            attempted: false,
        }
    }

    pub async fn record(&mut self) -> RecordOutcome {
        self.record_at(Local::now().date_naive()).await
    }

    pub async fn record_at(&mut self, today: NaiveDate) -> RecordOutcome {
        // One shot per instance, set before the call so a failing remote
        // cannot turn a re-render into a retry storm.
        if self.attempted {
            return RecordOutcome::Duplicate;
        }
        self.attempted = true;

        if self.lock_store().has_recorded(today, &self.page_key) {
            return RecordOutcome::Duplicate;
        }

        match self.api.increment_visit().await {
            Ok(()) => {
                self.lock_store().mark_recorded(today, &self.page_key);
                RecordOutcome::Recorded
            }
            Err(err) => {
                // Best effort: log, leave unmarked, let a later mount retry.
                warn!(page = %self.page_key, "visit increment failed: {err}");
                RecordOutcome::Failed
            }
        }
    }

    fn lock_store(&self) -> std::sync::MutexGuard<'_, dyn DedupStore + 'static> {
        // A poisoned store still only holds dedup markers; worst case is
        // one duplicate increment, so keep using it.
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Fires an item-click increment, swallowing failure. Clicks are never
/// deduplicated.
pub async fn record_item_click(api: &dyn CounterApi, item_id: &str) {
    if let Err(err) = api.increment_item_click(item_id).await {
        warn!(item = item_id, "item click increment failed: {err}");
    }
}

/// `CounterApi` over the HTTP counter service.
pub struct HttpCounterApi {
    base_url: String,
    client: Client,
}

impl HttpCounterApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CounterApi for HttpCounterApi {
    async fn increment_visit(&self) -> Result<(), TrackError> {
        let response = self
            .client
            .post(format!("{}/api/visits", self.base_url))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(TrackError::Rejected(response.status()))
        }
    }

    async fn increment_item_click(&self, item_id: &str) -> Result<(), TrackError> {
        let response = self
            .client
            .post(format!("{}/api/clicks", self.base_url))
            .json(&json!({ "item_id": item_id }))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(TrackError::Rejected(response.status()))
        }
    }
}
