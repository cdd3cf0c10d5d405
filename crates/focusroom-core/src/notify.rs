//! Side-effect sink fired once per natural countdown expiry.

use tracing::info;

use crate::session::Category;

/// Fire-and-forget completion notification (sound, banner, haptics...).
pub trait Notifier: Send + Sync {
    fn timer_finished(&self, category: &Category, duration_secs: u64);
}

/// Writes completions to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn timer_finished(&self, category: &Category, duration_secs: u64) {
        info!(%category, duration_secs, "focus session complete");
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn timer_finished(&self, _category: &Category, _duration_secs: u64) {}
}
