//! Session-start initialization.

use heimdall_tracker::ActivityTracker;

/// Re-initialize tracker state and purge anything stale. Always succeeds;
/// the caller acknowledges with `{"status": "initialized"}`.
pub fn handle(tracker: &dyn ActivityTracker) {
    tracing::debug!("session-start");
    tracker.init();
    tracker.cleanup();
}
