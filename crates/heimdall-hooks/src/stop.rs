//! Stop gating: require review only when code was actually touched.

use heimdall_core::rules::rule;
use heimdall_core::{rules, SessionState, Verdict};
use heimdall_tracker::ActivityTracker;

/// Handle the stop event.
///
/// Pure information-gathering sessions (no files edited) complete freely.
/// Otherwise the adversarial-review and reflection rules gate completion, in
/// that order. Unreadable session state fails closed: it forces review
/// rather than silently skipping it.
pub fn handle(tracker: &dyn ActivityTracker) -> Verdict {
    let any_edits = match tracker
        .get()
        .map(serde_json::from_value::<SessionState>)
    {
        Some(Ok(state)) => !state.files_edited.is_empty(),
        // Unreadable or malformed state: assume code was touched.
        Some(Err(_)) | None => true,
    };

    if !any_edits {
        tracing::debug!("no files edited this session, skipping review gates");
        return Verdict::Allow;
    }

    for gate in [rule::ADVISORS_BEFORE_STOP, rule::REFLECTION_BEFORE_STOP] {
        let (passed, _) = tracker.check(gate, "");
        if !passed {
            let msg = rules::block_message(gate).unwrap_or(gate);
            return Verdict::Block(msg.to_string());
        }
    }

    Verdict::Allow
}
