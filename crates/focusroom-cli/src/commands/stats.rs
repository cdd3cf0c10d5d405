use chrono::Local;
use clap::Subcommand;
use focusroom_core::stats::{
    all_time_total_seconds, category_totals, last_7_days_series, today_total_seconds,
    total_distractions,
};
use focusroom_core::{Config, StatsReport};
use serde_json::json;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's focus time
    Today,
    /// All-time totals
    All,
    /// Focus minutes for each of the last 7 days
    Week,
    /// Focus time per category
    Categories,
    /// Every statistic at once
    Report,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let sessions = super::open_store(&config)?.load_all();
    let now = Local::now();

    let output = match action {
        StatsAction::Today => {
            let seconds = today_total_seconds(&sessions, &now);
            json!({ "today_seconds": seconds, "today_minutes": seconds / 60 })
        }
        StatsAction::All => {
            let seconds = all_time_total_seconds(&sessions);
            json!({
                "session_count": sessions.len(),
                "total_seconds": seconds,
                "total_minutes": seconds / 60,
                "total_distractions": total_distractions(&sessions),
            })
        }
        StatsAction::Week => serde_json::to_value(last_7_days_series(&sessions, &now))?,
        StatsAction::Categories => serde_json::to_value(category_totals(&sessions))?,
        StatsAction::Report => serde_json::to_value(StatsReport::compute(&sessions, &now))?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
