use crate::models::{AggregatedStats, CounterData, TodayStats};
use chrono::{Duration, Local, NaiveDate};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const MAX_WINDOW_DAYS: u32 = 365;

pub fn today_stats(data: &CounterData) -> TodayStats {
    today_stats_at(Local::now().date_naive(), data)
}

pub fn today_stats_at(today: NaiveDate, data: &CounterData) -> TodayStats {
    let key = date_key(today);
    TodayStats {
        visits: data.visit_days.get(&key).copied().unwrap_or_default(),
        clicks: data.click_days.get(&key).copied().unwrap_or_default(),
        date: key,
    }
}

pub fn window_stats(window_days: u32, data: &CounterData) -> AggregatedStats {
    window_stats_at(Local::now().date_naive(), window_days, data)
}

/// Totals over the trailing window ending at `today`, inclusive. Days with
/// no rows count as zero.
pub fn window_stats_at(today: NaiveDate, window_days: u32, data: &CounterData) -> AggregatedStats {
    let window_days = window_days.max(1);
    let start = today - Duration::days(i64::from(window_days) - 1);

    let mut total_visits = 0u64;
    let mut total_clicks = 0u64;
    for offset in 0..window_days {
        let key = date_key(start + Duration::days(i64::from(offset)));
        total_visits =
            total_visits.saturating_add(data.visit_days.get(&key).copied().unwrap_or_default());
        total_clicks =
            total_clicks.saturating_add(data.click_days.get(&key).copied().unwrap_or_default());
    }

    AggregatedStats {
        window_days,
        start_date: date_key(start),
        end_date: date_key(today),
        total_visits,
        total_clicks,
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_with_visits(rows: &[(&str, u64)]) -> CounterData {
        let mut data = CounterData::default();
        for (date, visits) in rows {
            data.visit_days.insert((*date).to_string(), *visits);
        }
        data
    }

    #[test]
    fn today_picks_only_the_current_date_row() {
        let data = data_with_visits(&[("2024-01-01", 5), ("2024-01-02", 7)]);
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let stats = today_stats_at(today, &data);
        assert_eq!(stats.date, "2024-01-02");
        assert_eq!(stats.visits, 7);
        assert_eq!(stats.clicks, 0);
    }

    #[test]
    fn window_sums_all_rows_inside_the_range() {
        let data = data_with_visits(&[("2024-01-01", 5), ("2024-01-02", 7)]);
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let stats = window_stats_at(today, 30, &data);
        assert_eq!(stats.total_visits, 12);
        assert_eq!(stats.total_clicks, 0);
        assert_eq!(stats.end_date, "2024-01-02");
        assert_eq!(stats.start_date, "2023-12-04");
    }

    #[test]
    fn window_excludes_rows_older_than_the_range() {
        let data = data_with_visits(&[("2024-01-01", 5), ("2024-01-02", 7)]);
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let stats = window_stats_at(today, 1, &data);
        assert_eq!(stats.total_visits, 7);
    }

    #[test]
    fn empty_data_counts_as_zero() {
        let data = CounterData::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        assert_eq!(today_stats_at(today, &data).visits, 0);
        assert_eq!(window_stats_at(today, 30, &data).total_visits, 0);
    }

    #[test]
    fn clicks_aggregate_from_click_day_rows() {
        let mut data = CounterData::default();
        data.click_days.insert("2024-01-01".to_string(), 2);
        data.click_days.insert("2024-01-02".to_string(), 3);
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert_eq!(today_stats_at(today, &data).clicks, 3);
        assert_eq!(window_stats_at(today, 30, &data).total_clicks, 5);
    }

    #[test]
    fn zero_window_is_clamped_to_one_day() {
        let data = data_with_visits(&[("2024-01-02", 7)]);
        let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let stats = window_stats_at(today, 0, &data);
        assert_eq!(stats.window_days, 1);
        assert_eq!(stats.total_visits, 7);
    }
}
