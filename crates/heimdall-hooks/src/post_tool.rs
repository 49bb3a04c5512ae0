//! Post-tool tracking: pure observation, never blocks.

use heimdall_core::rules::event;
use heimdall_core::ToolCall;
use heimdall_tracker::ActivityTracker;

/// Record the side effects of a completed tool call. Always succeeds; the
/// caller acknowledges with `{"status": "tracked"}` regardless.
pub fn handle(tracker: &dyn ActivityTracker, call: &ToolCall) {
    tracing::debug!(?call, "post-tool");
    match call {
        call if call.is_file_edit() => {
            if let Some(path) = call.file_path().filter(|p| !p.is_empty()) {
                tracker.track(event::FILE_EDIT, path);
            }
        }
        ToolCall::TodoWrite => tracker.track(event::TODO_CREATED, ""),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeTracker;
    use serde_json::json;

    #[test]
    fn file_edit_tracks_path() {
        let tracker = FakeTracker::new();
        let call = ToolCall::decode(
            "Edit",
            &json!({"file_path": "/src/lib.rs", "old_string": "a", "new_string": "b"}),
        );
        handle(&tracker, &call);
        assert_eq!(tracker.calls(), vec!["track file_edit /src/lib.rs"]);
    }

    #[test]
    fn file_edit_without_path_tracks_nothing() {
        let tracker = FakeTracker::new();
        handle(&tracker, &ToolCall::decode("Write", &json!({"content": "x"})));
        assert!(tracker.calls().is_empty());
    }

    #[test]
    fn todo_write_tracks_creation() {
        let tracker = FakeTracker::new();
        handle(&tracker, &ToolCall::TodoWrite);
        assert_eq!(tracker.calls(), vec!["track todo_created"]);
    }

    #[test]
    fn other_tools_track_nothing() {
        let tracker = FakeTracker::new();
        handle(&tracker, &ToolCall::Other);
        handle(
            &tracker,
            &ToolCall::Task {
                subagent_type: "git-agent".into(),
            },
        );
        handle(&tracker, &ToolCall::SequentialThinking);
        assert!(tracker.calls().is_empty());
    }
}
