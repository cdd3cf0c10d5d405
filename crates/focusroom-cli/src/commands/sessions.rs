use chrono::Local;
use clap::Subcommand;
use focusroom_core::format::format_duration;
use focusroom_core::Config;

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List recorded sessions, newest last
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Only show the most recent N sessions
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: SessionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let sessions = super::open_store(&config)?.load_all();

    match action {
        SessionsAction::List { json, limit } => {
            let skip = limit.map_or(0, |n| sessions.len().saturating_sub(n));
            let shown = &sessions[skip..];

            if json {
                println!("{}", serde_json::to_string_pretty(shown)?);
                return Ok(());
            }
            if shown.is_empty() {
                println!("No sessions recorded yet.");
                return Ok(());
            }
            for s in shown {
                println!(
                    "{}  {:<10} {:>9}  distractions: {}",
                    s.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    s.category_label(),
                    format_duration(s.duration_seconds),
                    s.distract_count,
                );
            }
        }
    }
    Ok(())
}
