//! Session aggregation.
//!
//! All functions are pure. "Today" and day boundaries follow the time zone
//! of the reference `now`, so callers pass `Local::now()` for the user's
//! calendar and fixed zones in tests.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Number of days in [`last_7_days_series`].
pub const SERIES_DAYS: usize = 7;

/// Focus time on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    /// Short weekday name ("Mon", "Tue", ...).
    pub weekday: String,
    pub seconds: u64,
    /// `seconds` rounded to the nearest whole minute.
    pub minutes: u64,
}

/// Everything the statistics view shows, computed in one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    pub session_count: usize,
    pub today_seconds: u64,
    pub today_minutes: u64,
    pub total_seconds: u64,
    pub total_minutes: u64,
    pub total_distractions: u64,
    pub last_7_days: Vec<DailyTotal>,
    pub categories: IndexMap<String, u64>,
}

impl StatsReport {
    pub fn compute<Tz: TimeZone>(sessions: &[Session], now: &DateTime<Tz>) -> Self {
        let today_seconds = today_total_seconds(sessions, now);
        let total_seconds = all_time_total_seconds(sessions);
        Self {
            session_count: sessions.len(),
            today_seconds,
            today_minutes: today_seconds / 60,
            total_seconds,
            total_minutes: total_seconds / 60,
            total_distractions: total_distractions(sessions),
            last_7_days: last_7_days_series(sessions, now),
            categories: category_totals(sessions),
        }
    }
}

fn local_date<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

fn rounded_minutes(seconds: u64) -> u64 {
    (seconds + 30) / 60
}

/// Focus seconds recorded on the same calendar day as `now`.
pub fn today_total_seconds<Tz: TimeZone>(sessions: &[Session], now: &DateTime<Tz>) -> u64 {
    let tz = now.timezone();
    let today = now.date_naive();
    sessions
        .iter()
        .filter(|s| local_date(&s.created_at, &tz) == today)
        .map(|s| s.duration_seconds)
        .sum()
}

pub fn all_time_total_seconds(sessions: &[Session]) -> u64 {
    sessions.iter().map(|s| s.duration_seconds).sum()
}

pub fn total_distractions(sessions: &[Session]) -> u64 {
    sessions.iter().map(|s| u64::from(s.distract_count)).sum()
}

/// Per-day totals for the seven calendar days ending at `now`, oldest first.
pub fn last_7_days_series<Tz: TimeZone>(sessions: &[Session], now: &DateTime<Tz>) -> Vec<DailyTotal> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut by_day: HashMap<NaiveDate, u64> = HashMap::new();
    for s in sessions {
        *by_day.entry(local_date(&s.created_at, &tz)).or_default() += s.duration_seconds;
    }

    (0..SERIES_DAYS)
        .rev()
        .map(|days_back| {
            let date = today - Duration::days(days_back as i64);
            let seconds = by_day.get(&date).copied().unwrap_or(0);
            DailyTotal {
                date,
                weekday: date.format("%a").to_string(),
                seconds,
                minutes: rounded_minutes(seconds),
            }
        })
        .collect()
}

/// Seconds per category label in first-seen order, omitting empty buckets.
pub fn category_totals(sessions: &[Session]) -> IndexMap<String, u64> {
    let mut totals: IndexMap<String, u64> = IndexMap::new();
    for s in sessions {
        *totals.entry(s.category_label().to_string()).or_default() += s.duration_seconds;
    }
    totals.retain(|_, seconds| *seconds > 0);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn session(category: &str, secs: u64, created: &str, distractions: u32) -> Session {
        Session::new(category, secs, at(created), distractions)
    }

    fn now_utc() -> DateTime<Utc> {
        at("2026-04-15T18:00:00Z")
    }

    #[test]
    fn today_and_all_time_totals() {
        let sessions = vec![
            session("Study", 600, "2026-04-15T09:00:00Z", 0),
            session("Study", 300, "2026-04-14T09:00:00Z", 0),
        ];
        assert_eq!(today_total_seconds(&sessions, &now_utc()), 600);
        assert_eq!(all_time_total_seconds(&sessions), 900);
    }

    #[test]
    fn today_follows_reference_time_zone() {
        // 23:30 UTC on the 14th is already the 15th at UTC+03:00.
        let sessions = vec![session("Work", 1200, "2026-04-14T23:30:00Z", 0)];
        let istanbul = FixedOffset::east_opt(3 * 3600).unwrap();
        let now_local = now_utc().with_timezone(&istanbul);
        assert_eq!(today_total_seconds(&sessions, &now_local), 1200);
        assert_eq!(today_total_seconds(&sessions, &now_utc()), 0);
    }

    #[test]
    fn distractions_sum_across_sessions() {
        let sessions = vec![
            session("Study", 60, "2026-04-15T09:00:00Z", 2),
            session("Work", 60, "2026-01-01T09:00:00Z", 3),
        ];
        assert_eq!(total_distractions(&sessions), 5);
    }

    #[test]
    fn series_has_seven_days_oldest_first() {
        let sessions = vec![
            session("Study", 1500, "2026-04-15T08:00:00Z", 0),
            session("Study", 90, "2026-04-15T10:00:00Z", 0),
            session("Work", 600, "2026-04-09T12:00:00Z", 0),
            session("Work", 3600, "2026-04-08T12:00:00Z", 0),
        ];
        let series = last_7_days_series(&sessions, &now_utc());
        assert_eq!(series.len(), SERIES_DAYS);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2026, 4, 9).unwrap());
        assert_eq!(series[6].date, NaiveDate::from_ymd_opt(2026, 4, 15).unwrap());
        assert_eq!(series[0].minutes, 10);
        assert_eq!(series[6].seconds, 1590);
        assert_eq!(series[6].minutes, 27);
        assert_eq!(series[6].weekday, "Wed");
        assert!(series[1..6].iter().all(|d| d.seconds == 0));
    }

    #[test]
    fn series_minutes_round_half_up() {
        let sessions = vec![
            session("Study", 89, "2026-04-15T08:00:00Z", 0),
            session("Study", 90, "2026-04-14T08:00:00Z", 0),
        ];
        let series = last_7_days_series(&sessions, &now_utc());
        assert_eq!(series[6].minutes, 1);
        assert_eq!(series[5].minutes, 2);
    }

    #[test]
    fn series_is_all_zero_without_sessions() {
        let series = last_7_days_series(&[], &now_utc());
        assert_eq!(series.len(), SERIES_DAYS);
        assert!(series.iter().all(|d| d.seconds == 0 && d.minutes == 0));
    }

    #[test]
    fn category_totals_keep_first_seen_order_and_group_blank_as_other() {
        let sessions = vec![
            session("Work", 300, "2026-04-15T08:00:00Z", 0),
            session("", 120, "2026-04-15T09:00:00Z", 0),
            session("Study", 600, "2026-04-15T10:00:00Z", 0),
            session("Work", 60, "2026-04-15T11:00:00Z", 0),
        ];
        let totals = category_totals(&sessions);
        let keys: Vec<&str> = totals.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Work", "Other", "Study"]);
        assert_eq!(totals["Work"], 360);
        assert_eq!(totals["Other"], 120);
    }

    #[test]
    fn category_totals_skip_zero_buckets() {
        let sessions = vec![session("Exam", 0, "2026-04-15T08:00:00Z", 0)];
        assert!(category_totals(&sessions).is_empty());
    }

    #[test]
    fn report_bundles_every_figure() {
        let sessions = vec![
            session("Study", 659, "2026-04-15T09:00:00Z", 1),
            session("Exam", 300, "2026-04-10T09:00:00Z", 2),
        ];
        let report = StatsReport::compute(&sessions, &now_utc());
        assert_eq!(report.session_count, 2);
        assert_eq!(report.today_seconds, 659);
        assert_eq!(report.today_minutes, 10);
        assert_eq!(report.total_seconds, 959);
        assert_eq!(report.total_minutes, 15);
        assert_eq!(report.total_distractions, 3);
        assert_eq!(report.last_7_days.len(), 7);
        assert_eq!(report.categories.len(), 2);
    }
}
