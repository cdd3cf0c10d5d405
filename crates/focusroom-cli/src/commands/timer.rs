use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use focusroom_core::format::{format_clock, format_duration};
use focusroom_core::{
    AppState, Category, Config, Event, LogNotifier, NoopNotifier, Notifier, ResumeChoice,
    SessionRecorder, TimerController, TimerEngine,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};

const HELP: &str = "commands: [s]tart  [p]ause  [r]eset  +N/-N minutes  c <category>  \
[b]ackground  [f]oreground  [y]es/[n]o to resume  [t] status  [q]uit";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a countdown in the terminal, reading commands from stdin
    Run {
        /// Countdown length in minutes (1-90)
        #[arg(long)]
        minutes: Option<u32>,
        /// Category label (study, work, project, exam, personal or any text)
        #[arg(long)]
        category: Option<String>,
    },
    /// List the built-in categories
    Categories,
}

/// Rings the terminal bell when a countdown finishes.
struct BellNotifier;

impl Notifier for BellNotifier {
    fn timer_finished(&self, category: &Category, duration_secs: u64) {
        print!("\x07");
        println!("\nTime's up! {category} session of {} complete.", format_duration(duration_secs));
    }
}

enum Input {
    Start,
    Pause,
    Reset,
    Adjust(i32),
    Category(Category),
    Lifecycle(AppState),
    Resume(ResumeChoice),
    Status,
    Quit,
    Help,
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("c ") {
        return Some(Input::Category(Category::from(rest)));
    }
    if line.starts_with('+') || line.starts_with('-') {
        return line.parse::<i32>().ok().map(Input::Adjust);
    }
    let input = match line {
        "s" | "start" => Input::Start,
        "p" | "pause" => Input::Pause,
        "r" | "reset" => Input::Reset,
        "b" | "background" => Input::Lifecycle(AppState::Background),
        "f" | "foreground" => Input::Lifecycle(AppState::Active),
        "y" | "yes" => Input::Resume(ResumeChoice::Resume),
        "n" | "no" => Input::Resume(ResumeChoice::Decline),
        "t" | "status" => Input::Status,
        "q" | "quit" => Input::Quit,
        "h" | "help" | "?" => Input::Help,
        _ => return None,
    };
    Some(input)
}

fn describe(event: &Event) -> Option<String> {
    let text = match event {
        Event::TimerStarted {
            category,
            remaining_secs,
            ..
        } => format!("Started {category} focus at {}", format_clock(*remaining_secs)),
        Event::TimerPaused { remaining_secs, .. } => {
            format!("Paused at {}", format_clock(*remaining_secs))
        }
        Event::TimerResumed { remaining_secs, .. } => {
            format!("Resumed at {}", format_clock(*remaining_secs))
        }
        Event::TimerReset { recorded, .. } => match recorded {
            Some(s) => format!("Reset; saved {} of {}", format_duration(s.duration_seconds), s.category),
            None => "Reset".to_string(),
        },
        Event::TimerCompleted {
            session: Some(s), ..
        } => format!("Saved {} of {}", format_duration(s.duration_seconds), s.category),
        Event::TimerCompleted { session: None, .. } => "Countdown finished".to_string(),
        Event::CategoryChanged {
            category, recorded, ..
        } => match recorded {
            Some(s) => format!(
                "Category is now {category}; saved {} of {}",
                format_duration(s.duration_seconds),
                s.category
            ),
            None => format!("Category is now {category}"),
        },
        Event::DurationChanged {
            configured_minutes, ..
        } => format!("Countdown length is now {configured_minutes} min"),
        Event::Interrupted { distractions, .. } => {
            format!("Left the timer; paused (distractions: {distractions})")
        }
        Event::ResumePrompted { remaining_secs, .. } => format!(
            "Resume the interrupted session at {}? [y/n]",
            format_clock(*remaining_secs)
        ),
        Event::ResumeDeclined { .. } => "Session left paused; reset to save it".to_string(),
        Event::DisplayRestored { remaining_secs } => {
            format!("Ready: {}", format_clock(*remaining_secs))
        }
        Event::StateSnapshot { snapshot, .. } => format!(
            "{:?}: {} {} left of {} min (distractions: {})",
            snapshot.state,
            snapshot.category,
            format_clock(snapshot.remaining_secs),
            snapshot.configured_minutes,
            snapshot.distractions
        ),
        Event::TimerTicked { .. } => return None,
    };
    Some(text)
}

fn render(event: &Event) {
    match event {
        Event::TimerTicked { remaining_secs } => {
            print!("\r{}   ", format_clock(*remaining_secs));
            let _ = std::io::stdout().flush();
        }
        other => {
            if let Some(text) = describe(other) {
                println!("\r{text}");
            }
        }
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { minutes, category } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_interactive(minutes, category))
        }
        TimerAction::Categories => {
            for category in Category::BUILT_IN {
                println!("{category}");
            }
            Ok(())
        }
    }
}

async fn run_interactive(
    minutes: Option<u32>,
    category: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let recorder = SessionRecorder::new(super::open_store(&config)?);
    let category = category
        .map(|c| Category::from(c.as_str()))
        .unwrap_or_else(|| config.timer.default_category.clone());
    let minutes = minutes.unwrap_or(config.timer.default_minutes);

    let notifier: Arc<dyn Notifier> = match (config.notifications.enabled, config.notifications.bell) {
        (false, _) => Arc::new(NoopNotifier),
        (true, true) => Arc::new(BellNotifier),
        (true, false) => Arc::new(LogNotifier),
    };

    let controller = TimerController::new(TimerEngine::new(recorder, minutes, category), notifier)
        .with_tick_interval(Duration::from_millis(config.timer.tick_interval_ms))
        .with_display_reset_delay(Duration::from_secs(config.timer.display_reset_secs));

    let (lifecycle_tx, lifecycle_rx) = mpsc::channel(8);
    controller.subscribe_lifecycle(lifecycle_rx).await;
    let mut events = controller.subscribe();

    println!("{HELP}");
    controller.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            biased;

            event = events.recv() => match event {
                Ok(event) => render(&event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "display fell behind timer events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Some(Input::Start) => { controller.start().await; }
                    Some(Input::Pause) => { controller.pause().await; }
                    Some(Input::Reset) => { controller.reset().await; }
                    Some(Input::Adjust(delta)) => {
                        if controller.adjust_configured_minutes(delta).await.is_none() {
                            println!("Pause or reset before changing the length");
                        }
                    }
                    Some(Input::Category(category)) => {
                        if controller.set_category(category).await.is_none() {
                            println!("Pause or reset before changing the category");
                        }
                    }
                    Some(Input::Lifecycle(state)) => {
                        lifecycle_tx.send(state).await?;
                    }
                    Some(Input::Resume(choice)) => { controller.resolve_resume(choice).await; }
                    Some(Input::Status) => { controller.publish_snapshot().await; }
                    Some(Input::Quit) => break,
                    Some(Input::Help) => println!("{HELP}"),
                    None => println!("unknown command; {HELP}"),
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    // Quitting ends the run like a manual reset so partial time is kept.
    if let Some(event) = controller.reset().await {
        render(&event);
    }
    controller.shutdown().await;
    Ok(())
}
