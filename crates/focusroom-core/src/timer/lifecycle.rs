//! Foreground/background handling for a running countdown.

use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::recorder::SessionSink;

use super::engine::TimerEngine;

/// Host process lifecycle signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    Active,
    Background,
}

/// Answer to the "resume interrupted session?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeChoice {
    Resume,
    Decline,
}

/// Translates lifecycle transitions into timer engine effects.
///
/// Never records a session itself; recording stays with the engine.
#[derive(Debug, Clone)]
pub struct LifecycleMonitor {
    previous: AppState,
}

impl Default for LifecycleMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleMonitor {
    /// A monitor for a process that starts in the foreground.
    pub fn new() -> Self {
        Self::with_state(AppState::Active)
    }

    pub fn with_state(previous: AppState) -> Self {
        Self { previous }
    }

    pub fn previous(&self) -> AppState {
        self.previous
    }

    /// Apply the transition from the remembered state to `next`.
    pub fn on_change<R: SessionSink>(
        &mut self,
        next: AppState,
        engine: &mut TimerEngine<R>,
    ) -> Option<Event> {
        let prev = std::mem::replace(&mut self.previous, next);
        match (prev, next) {
            (AppState::Active, AppState::Background) => engine.interrupt(),
            (AppState::Background, AppState::Active) => engine.raise_resume_prompt(),
            _ => None,
        }
    }
}
