use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{Category, Session};
use crate::timer::TimerSnapshot;

/// Every state change in the timer core produces an Event.
/// The presentation layer subscribes to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        category: Category,
        configured_secs: u64,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed on a running countdown.
    TimerTicked {
        remaining_secs: u64,
    },
    /// Countdown reached zero. `session` is the record written for it.
    TimerCompleted {
        category: Category,
        duration_secs: u64,
        session: Option<Session>,
        at: DateTime<Utc>,
    },
    /// Timer returned to the configured length. `recorded` holds the
    /// partial session saved on the way, if any time had elapsed.
    TimerReset {
        recorded: Option<Session>,
        at: DateTime<Utc>,
    },
    /// The finished countdown display went back to the configured length.
    DisplayRestored {
        remaining_secs: u64,
    },
    CategoryChanged {
        category: Category,
        recorded: Option<Session>,
        at: DateTime<Utc>,
    },
    DurationChanged {
        configured_minutes: u32,
        at: DateTime<Utc>,
    },
    /// The app went to the background while the countdown was running.
    Interrupted {
        distractions: u32,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// An interrupted run is waiting for the user to resume or decline.
    ResumePrompted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ResumeDeclined {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        snapshot: TimerSnapshot,
        at: DateTime<Utc>,
    },
}
