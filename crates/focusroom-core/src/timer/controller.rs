//! Async driver around [`TimerEngine`].
//!
//! Owns the one-second ticker task, the post-expiry display reset and the
//! lifecycle event listener. Each of them is a spawned task whose
//! `JoinHandle` is aborted when the timer stops, so no tick can land after
//! a pause or a shutdown.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::events::Event;
use crate::notify::Notifier;
use crate::recorder::SessionSink;
use crate::session::Category;

use super::engine::{TimerEngine, TimerSnapshot};
use super::lifecycle::{AppState, LifecycleMonitor, ResumeChoice};

const EVENT_CAPACITY: usize = 64;

type TaskSlot = Arc<Mutex<Option<JoinHandle<()>>>>;

pub struct TimerController<R> {
    engine: Arc<Mutex<TimerEngine<R>>>,
    lifecycle: Arc<Mutex<LifecycleMonitor>>,
    ticker: TaskSlot,
    display_reset: TaskSlot,
    listener: TaskSlot,
    notifier: Arc<dyn Notifier>,
    events: broadcast::Sender<Event>,
    tick_interval: Duration,
    display_reset_delay: Duration,
}

impl<R> Clone for TimerController<R> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            lifecycle: self.lifecycle.clone(),
            ticker: self.ticker.clone(),
            display_reset: self.display_reset.clone(),
            listener: self.listener.clone(),
            notifier: self.notifier.clone(),
            events: self.events.clone(),
            tick_interval: self.tick_interval,
            display_reset_delay: self.display_reset_delay,
        }
    }
}

impl<R: SessionSink + Send + 'static> TimerController<R> {
    pub fn new(engine: TimerEngine<R>, notifier: Arc<dyn Notifier>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            engine: Arc::new(Mutex::new(engine)),
            lifecycle: Arc::new(Mutex::new(LifecycleMonitor::new())),
            ticker: Arc::new(Mutex::new(None)),
            display_reset: Arc::new(Mutex::new(None)),
            listener: Arc::new(Mutex::new(None)),
            notifier,
            events,
            tick_interval: Duration::from_secs(1),
            display_reset_delay: Duration::from_secs(2),
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_display_reset_delay(mut self, delay: Duration) -> Self {
        self.display_reset_delay = delay;
        self
    }

    /// Receive every event the timer produces from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        self.engine.lock().await.snapshot()
    }

    /// Broadcast the current state to every subscriber.
    pub async fn publish_snapshot(&self) -> Event {
        let snapshot = self.snapshot().await;
        let event = Event::StateSnapshot {
            snapshot,
            at: Utc::now(),
        };
        let _ = self.events.send(event.clone());
        event
    }

    /// Run `f` against the engine, e.g. to read the recorder's sessions.
    pub async fn with_engine<T>(&self, f: impl FnOnce(&TimerEngine<R>) -> T) -> T {
        let engine = self.engine.lock().await;
        f(&engine)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub async fn start(&self) -> Option<Event> {
        cancel(&self.display_reset).await;
        let event = self.engine.lock().await.start();
        if event.is_some() {
            self.spawn_ticker().await;
        }
        self.publish(event)
    }

    pub async fn pause(&self) -> Option<Event> {
        cancel(&self.ticker).await;
        let event = self.engine.lock().await.pause();
        self.publish(event)
    }

    pub async fn resume(&self) -> Option<Event> {
        let event = self.engine.lock().await.resume();
        if event.is_some() {
            self.spawn_ticker().await;
        }
        self.publish(event)
    }

    pub async fn reset(&self) -> Option<Event> {
        cancel(&self.ticker).await;
        cancel(&self.display_reset).await;
        let event = self.engine.lock().await.reset();
        self.publish(event)
    }

    pub async fn set_category(&self, category: Category) -> Option<Event> {
        let event = self.engine.lock().await.set_category(category);
        if event.is_some() {
            cancel(&self.display_reset).await;
        }
        self.publish(event)
    }

    pub async fn adjust_configured_minutes(&self, delta: i32) -> Option<Event> {
        let event = self.engine.lock().await.adjust_configured_minutes(delta);
        if event.is_some() {
            cancel(&self.display_reset).await;
        }
        self.publish(event)
    }

    pub async fn resolve_resume(&self, choice: ResumeChoice) -> Option<Event> {
        let event = self.engine.lock().await.resolve_resume(choice);
        if matches!(event, Some(Event::TimerResumed { .. })) {
            self.spawn_ticker().await;
        }
        self.publish(event)
    }

    /// Feed one lifecycle transition through the monitor.
    pub async fn handle_app_state(&self, next: AppState) -> Option<Event> {
        let (event, stale) = {
            let mut monitor = self.lifecycle.lock().await;
            let mut engine = self.engine.lock().await;
            let event = monitor.on_change(next, &mut engine);
            // Taken under the engine lock: a start that follows owns its own ticker.
            let stale = match &event {
                Some(Event::Interrupted { .. }) => self.ticker.lock().await.take(),
                _ => None,
            };
            (event, stale)
        };
        stop(stale).await;
        self.publish(event)
    }

    /// Consume lifecycle transitions from `rx` until it closes or
    /// [`shutdown`](Self::shutdown) runs. Replaces any earlier subscription.
    pub async fn subscribe_lifecycle(&self, mut rx: mpsc::Receiver<AppState>) {
        let controller = self.clone();
        let handle = tokio::spawn(async move {
            while let Some(state) = rx.recv().await {
                debug!(?state, "lifecycle transition");
                controller.handle_app_state(state).await;
            }
        });
        replace(&self.listener, handle).await;
    }

    /// Tear down every background task and stop the countdown.
    pub async fn shutdown(&self) {
        cancel(&self.listener).await;
        cancel(&self.ticker).await;
        cancel(&self.display_reset).await;
        self.engine.lock().await.pause();
        info!("timer controller shut down");
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn publish(&self, event: Option<Event>) -> Option<Event> {
        if let Some(ref ev) = event {
            // No subscribers is fine.
            let _ = self.events.send(ev.clone());
        }
        event
    }

    async fn spawn_ticker(&self) {
        let engine = self.engine.clone();
        let events = self.events.clone();
        let notifier = self.notifier.clone();
        let display_reset = self.display_reset.clone();
        let tick_interval = self.tick_interval;
        let reset_delay = self.display_reset_delay;

        let handle = tokio::spawn(async move {
            // First tick one full interval after start.
            let mut interval = time::interval_at(time::Instant::now() + tick_interval, tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;

                let event = {
                    let mut guard = engine.lock().await;
                    if !guard.is_running() {
                        break;
                    }
                    guard.tick()
                };

                let Some(event) = event else { break };
                let completed = match &event {
                    Event::TimerCompleted {
                        category,
                        duration_secs,
                        ..
                    } => {
                        notifier.timer_finished(category, *duration_secs);
                        true
                    }
                    _ => false,
                };
                let _ = events.send(event);

                if completed {
                    let restore = spawn_display_reset(engine.clone(), events.clone(), reset_delay);
                    replace(&display_reset, restore).await;
                    break;
                }
            }
        });

        replace(&self.ticker, handle).await;
    }
}

fn spawn_display_reset<R: SessionSink + Send + 'static>(
    engine: Arc<Mutex<TimerEngine<R>>>,
    events: broadcast::Sender<Event>,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        time::sleep(delay).await;
        if let Some(event) = engine.lock().await.restore_display() {
            let _ = events.send(event);
        }
    })
}

/// Store `handle` in `slot`, tearing down whatever task was there.
async fn replace(slot: &TaskSlot, handle: JoinHandle<()>) {
    let previous = slot.lock().await.replace(handle);
    if let Some(previous) = previous {
        previous.abort();
    }
}

/// Abort the task in `slot` and wait until it is gone.
async fn cancel(slot: &TaskSlot) {
    let handle = slot.lock().await.take();
    stop(handle).await;
}

async fn stop(handle: Option<JoinHandle<()>>) {
    if let Some(handle) = handle {
        handle.abort();
        let _ = handle.await;
    }
}
