//! Timer engine implementation.
//!
//! The timer engine is a second-granularity countdown state machine. It does
//! not use internal threads - the caller is responsible for calling `tick()`
//! once per elapsed second while the timer runs.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused -> Running)* -> Finished -> Idle
//!           \-> reset / category change (records partial time) -> Idle
//! ```
//!
//! Sessions are written through the engine's [`SessionSink`] at two points
//! only: natural expiry in `tick()`, and `reset()`/`set_category()` while
//! time has elapsed.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::recorder::SessionSink;
use crate::session::{Category, Session};

use super::lifecycle::ResumeChoice;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 90;
pub const DEFAULT_MINUTES: u32 = 25;

/// Coarse timer phase, derived from the countdown fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Full configured length remaining, not running.
    Idle,
    Running,
    /// Stopped with part of the countdown consumed.
    Paused,
    /// Countdown ran to zero and has not been reset yet.
    Finished,
}

/// Presentation-facing copy of the timer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub category: Category,
    pub configured_minutes: u32,
    pub remaining_secs: u64,
    pub elapsed_secs: u64,
    pub distractions: u32,
    pub resume_pending: bool,
}

/// Core countdown engine.
///
/// `R` receives the session records; in the app it is a
/// [`SessionRecorder`](crate::recorder::SessionRecorder).
#[derive(Debug)]
pub struct TimerEngine<R> {
    recorder: R,
    configured_minutes: u32,
    seconds_remaining: u64,
    running: bool,
    category: Category,
    distractions: u32,
    resume_pending: bool,
}

impl<R: SessionSink> TimerEngine<R> {
    /// Create an idle engine. `configured_minutes` is clamped to 1..=90.
    pub fn new(recorder: R, configured_minutes: u32, category: Category) -> Self {
        let configured_minutes = configured_minutes.clamp(MIN_MINUTES, MAX_MINUTES);
        Self {
            recorder,
            configured_minutes,
            seconds_remaining: minutes_to_secs(configured_minutes),
            running: false,
            category,
            distractions: 0,
            resume_pending: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn configured_minutes(&self) -> u32 {
        self.configured_minutes
    }

    pub fn configured_secs(&self) -> u64 {
        minutes_to_secs(self.configured_minutes)
    }

    pub fn seconds_remaining(&self) -> u64 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn distractions(&self) -> u32 {
        self.distractions
    }

    pub fn resume_pending(&self) -> bool {
        self.resume_pending
    }

    /// Focus time consumed so far in the current countdown.
    pub fn elapsed_secs(&self) -> u64 {
        self.configured_secs().saturating_sub(self.seconds_remaining)
    }

    /// True once the countdown has hit zero and before anything resets it.
    pub fn is_finished(&self) -> bool {
        self.seconds_remaining == 0
    }

    /// Some, but not all, of the countdown has been consumed.
    pub fn has_partial_session(&self) -> bool {
        self.seconds_remaining > 0 && self.seconds_remaining < self.configured_secs()
    }

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.is_finished() {
            TimerState::Finished
        } else if self.seconds_remaining < self.configured_secs() {
            TimerState::Paused
        } else {
            TimerState::Idle
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state(),
            category: self.category.clone(),
            configured_minutes: self.configured_minutes,
            remaining_secs: self.seconds_remaining,
            elapsed_secs: self.elapsed_secs(),
            distractions: self.distractions,
            resume_pending: self.resume_pending,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the countdown. A finished countdown restarts from the full
    /// configured length with a fresh distraction count.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        if self.is_finished() {
            self.seconds_remaining = self.configured_secs();
            self.distractions = 0;
        }
        self.running = true;
        self.resume_pending = false;
        Some(Event::TimerStarted {
            category: self.category.clone(),
            configured_secs: self.configured_secs(),
            remaining_secs: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Continue an interrupted or paused run without touching its counters.
    pub fn resume(&mut self) -> Option<Event> {
        if self.running || self.is_finished() {
            return None;
        }
        self.running = true;
        self.resume_pending = false;
        Some(Event::TimerResumed {
            remaining_secs: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns `Event::TimerCompleted` when the
    /// countdown reaches zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining > 0 {
            return Some(Event::TimerTicked {
                remaining_secs: self.seconds_remaining,
            });
        }

        self.running = false;
        let duration_secs = self.configured_secs();
        let session = self
            .recorder
            .record(duration_secs, &self.category, self.distractions);
        self.distractions = 0;
        Some(Event::TimerCompleted {
            category: self.category.clone(),
            duration_secs,
            session,
            at: Utc::now(),
        })
    }

    /// Stop and return to the configured length, recording any partial run.
    pub fn reset(&mut self) -> Option<Event> {
        let recorded = self.record_partial();
        self.clear_countdown();
        Some(Event::TimerReset {
            recorded,
            at: Utc::now(),
        })
    }

    /// Switch category. Rejected while running; otherwise records any
    /// partial run under the old category first.
    pub fn set_category(&mut self, category: Category) -> Option<Event> {
        if self.running {
            return None;
        }
        let recorded = self.record_partial();
        self.clear_countdown();
        self.category = category;
        Some(Event::CategoryChanged {
            category: self.category.clone(),
            recorded,
            at: Utc::now(),
        })
    }

    /// Change the countdown length by `delta` minutes, clamped to 1..=90.
    ///
    /// Rejected while running. Unrecorded partial progress is discarded.
    pub fn adjust_configured_minutes(&mut self, delta: i32) -> Option<Event> {
        if self.running {
            return None;
        }
        let next = (i64::from(self.configured_minutes) + i64::from(delta))
            .clamp(i64::from(MIN_MINUTES), i64::from(MAX_MINUTES));
        self.configured_minutes = u32::try_from(next).unwrap_or(DEFAULT_MINUTES);
        self.seconds_remaining = self.configured_secs();
        self.resume_pending = false;
        Some(Event::DurationChanged {
            configured_minutes: self.configured_minutes,
            at: Utc::now(),
        })
    }

    /// The app left the foreground mid-run: count a distraction and pause.
    pub fn interrupt(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.distractions += 1;
        self.running = false;
        Some(Event::Interrupted {
            distractions: self.distractions,
            remaining_secs: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Ask the user whether to continue a stopped partial run.
    pub fn raise_resume_prompt(&mut self) -> Option<Event> {
        if self.running || !self.has_partial_session() {
            return None;
        }
        self.resume_pending = true;
        Some(Event::ResumePrompted {
            remaining_secs: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    pub fn resolve_resume(&mut self, choice: ResumeChoice) -> Option<Event> {
        if !self.resume_pending {
            return None;
        }
        self.resume_pending = false;
        match choice {
            ResumeChoice::Resume => self.resume(),
            ResumeChoice::Decline => Some(Event::ResumeDeclined {
                remaining_secs: self.seconds_remaining,
                at: Utc::now(),
            }),
        }
    }

    /// Cosmetic reset of a finished countdown back to the configured length.
    ///
    /// Only acts while the timer is stopped at zero, so a run started in the
    /// meantime is left alone.
    pub fn restore_display(&mut self) -> Option<Event> {
        if self.running || !self.is_finished() {
            return None;
        }
        self.seconds_remaining = self.configured_secs();
        Some(Event::DisplayRestored {
            remaining_secs: self.seconds_remaining,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// A finished countdown was already recorded by `tick()`.
    fn record_partial(&mut self) -> Option<Session> {
        if self.is_finished() {
            return None;
        }
        let elapsed = self.elapsed_secs();
        if elapsed == 0 {
            return None;
        }
        self.recorder
            .record(elapsed, &self.category, self.distractions)
    }

    fn clear_countdown(&mut self) {
        self.running = false;
        self.seconds_remaining = self.configured_secs();
        self.distractions = 0;
        self.resume_pending = false;
    }
}

fn minutes_to_secs(minutes: u32) -> u64 {
    u64::from(minutes) * 60
}
