use crate::api::Completion;
use crate::app::AppState;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// How long the UI loop waits for a key before checking for completions
pub const DEFAULT_TICK_MS: u64 = 100;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Apply every completion that arrived since the last tick.
/// Returns how many were applied.
pub fn drain_completions(rx: &mut UnboundedReceiver<Completion>, app: &mut AppState) -> usize {
    let mut applied = 0;
    while let Ok(completion) = rx.try_recv() {
        app.apply(completion);
        applied += 1;
    }
    applied
}
