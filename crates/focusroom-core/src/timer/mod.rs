mod controller;
mod engine;
mod lifecycle;

pub use controller::TimerController;
pub use engine::{
    TimerEngine, TimerSnapshot, TimerState, DEFAULT_MINUTES, MAX_MINUTES, MIN_MINUTES,
};
pub use lifecycle::{AppState, LifecycleMonitor, ResumeChoice};
