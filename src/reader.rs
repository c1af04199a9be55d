//! Cached statistics reader.
//!
//! Holds the last computed "today" and rolling-window views and recomputes
//! them when the change feed reports new counter rows, when the cache was
//! explicitly invalidated, or when the date or requested window no longer
//! match the cached ones. The reader only ever reads counter rows.

use crate::feed::{ChangeFeed, ChangeSubscription};
use crate::models::{AggregatedStats, CounterData, TodayStats};
use crate::stats;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
struct CachedStats {
    computed_for: NaiveDate,
    window_days: u32,
    today: TodayStats,
    aggregated: AggregatedStats,
}

pub struct StatsReader {
    data: Arc<Mutex<CounterData>>,
    subscription: ChangeSubscription,
    cache: Option<CachedStats>,
    invalidated: bool,
}

impl StatsReader {
    pub fn new(data: Arc<Mutex<CounterData>>, feed: &ChangeFeed) -> Self {
        Self {
            data,
            subscription: feed.subscribe(),
            cache: None,
            invalidated: true,
        }
    }

    /// Marks the cache stale regardless of feed activity. Used by callers
    /// that know an increment just happened.
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub async fn today_stats(&mut self) -> TodayStats {
        self.today_stats_at(Local::now().date_naive()).await
    }

    pub async fn today_stats_at(&mut self, today: NaiveDate) -> TodayStats {
        let window_days = self.cached_window_days();
        self.current(today, window_days).await.today
    }

    pub async fn aggregated_stats(&mut self, window_days: u32) -> AggregatedStats {
        self.aggregated_stats_at(Local::now().date_naive(), window_days)
            .await
    }

    pub async fn aggregated_stats_at(
        &mut self,
        today: NaiveDate,
        window_days: u32,
    ) -> AggregatedStats {
        self.current(today, window_days).await.aggregated
    }

    fn cached_window_days(&self) -> u32 {
        self.cache
            .as_ref()
            .map(|cached| cached.window_days)
            .unwrap_or(stats::DEFAULT_WINDOW_DAYS)
    }

    async fn current(&mut self, today: NaiveDate, window_days: u32) -> CachedStats {
        let changed = self.subscription.drain();
        if !changed && !self.invalidated {
            if let Some(cached) = &self.cache {
                if cached.computed_for == today && cached.window_days == window_days {
                    return cached.clone();
                }
            }
        }

        let data = self.data.lock().await;
        let fresh = CachedStats {
            computed_for: today,
            window_days,
            today: stats::today_stats_at(today, &data),
            aggregated: stats::window_stats_at(today, window_days, &data),
        };
        drop(data);

        self.cache = Some(fresh.clone());
        self.invalidated = false;
        fresh
    }
}
