//! # Focusroom Core Library
//!
//! This library provides the core logic for the Focusroom focus timer: a
//! category-tagged countdown that records completed focus sessions to local
//! storage and derives statistics from them. The CLI binary is a thin
//! presentation layer over the same core.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A second-granularity countdown state machine that
//!   requires the caller to invoke `tick()` once per second
//! - **Lifecycle Monitor**: Turns foreground/background transitions into
//!   distraction counts, pauses and resume prompts
//! - **Session Recorder / Store**: Append-only session history persisted as
//!   one JSON array in a key-value slot (SQLite-backed on disk)
//! - **Statistics**: Pure aggregation over the stored sessions
//! - **Timer Controller**: Async driver owning the cancellable ticker task
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TimerController`]: Ticker and lifecycle subscription
//! - [`SessionRecorder`]: Creates and persists session records
//! - [`StatsReport`]: Aggregated statistics
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod format;
pub mod notify;
pub mod recorder;
pub mod session;
pub mod stats;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use notify::{LogNotifier, Notifier, NoopNotifier};
pub use recorder::{SessionRecorder, SessionSink};
pub use session::{Category, Session, OTHER_CATEGORY};
pub use stats::{DailyTotal, StatsReport};
pub use storage::{Config, Database, KeyValueStore, MemoryStore, SessionStore};
pub use timer::{
    AppState, LifecycleMonitor, ResumeChoice, TimerController, TimerEngine, TimerSnapshot,
    TimerState,
};
