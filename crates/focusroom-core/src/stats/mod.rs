//! Statistics module for Focusroom
//!
//! Read-only derivations over the full session history: daily and all-time
//! totals, the last-seven-days series and per-category totals. Everything
//! is recomputed from the list on every call.

mod aggregate;

pub use aggregate::{
    all_time_total_seconds, category_totals, last_7_days_series, today_total_seconds,
    total_distractions, DailyTotal, StatsReport, SERIES_DAYS,
};
