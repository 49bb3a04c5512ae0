//! Pre-tool enforcement: the only handler that can refuse an action.

use heimdall_core::rules::{self, rule};
use heimdall_core::tool;
use heimdall_core::{ToolCall, Verdict};
use heimdall_tracker::ActivityTracker;

/// Static policy knobs resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Path substring marking forbidden project-local host configuration.
    pub forbidden_config_marker: String,
}

impl Policy {
    pub fn from_env() -> Self {
        let forbidden_config_marker = std::env::var(rules::FORBIDDEN_CONFIG_ENV)
            .unwrap_or_else(|_| rules::DEFAULT_FORBIDDEN_CONFIG_MARKER.to_string());
        Self {
            forbidden_config_marker,
        }
    }
}

/// Handle a pre-tool event: gate, observe, or pass through depending on the
/// tool category.
pub fn handle(policy: &Policy, tracker: &dyn ActivityTracker, call: &ToolCall) -> Verdict {
    tracing::debug!(?call, "pre-tool");
    match call {
        ToolCall::TodoWrite => {
            let (passed, _) = tracker.check(rule::SEQUENTIAL_BEFORE_TODO, "");
            if !passed {
                return block(rule::SEQUENTIAL_BEFORE_TODO);
            }
            // Creation itself is tracked in post-tool.
            Verdict::Allow
        }

        call if call.is_file_edit() => handle_file_edit(policy, tracker, call),

        ToolCall::Task { subagent_type } => {
            // Observation only: classify the sub-agent and record membership.
            if tool::is_tool_agent(subagent_type) {
                tracker.track(rules::event::TOOL_AGENT, subagent_type);
            } else if tool::is_advisor(subagent_type) {
                tracker.track(rules::event::ADVISOR, subagent_type);
            }
            if subagent_type.as_str() == tool::SEQUENTIAL_THINKING_AGENT {
                tracker.track(rules::event::SEQUENTIAL_THINKING, "");
            }
            Verdict::Allow
        }

        ToolCall::SequentialThinking => {
            tracker.track(rules::event::SEQUENTIAL_THINKING, "");
            Verdict::Allow
        }

        _ => Verdict::Allow,
    }
}

/// File-edit gating: ordered blocking gates first, then non-blocking
/// advisories. Advisories do not accumulate — the first one that fires is
/// terminal and carries the returned message.
fn handle_file_edit(policy: &Policy, tracker: &dyn ActivityTracker, call: &ToolCall) -> Verdict {
    let file_path = call.file_path().unwrap_or("");

    // Forbidden project-config location: checked before any rule queries.
    if !file_path.is_empty() && file_path.contains(&policy.forbidden_config_marker) {
        return Verdict::Block(rules::MSG_BLOCK_PROJECT_CONFIG.to_string());
    }

    // Ordered gates: first failure wins.
    for gate in [rule::TODO_BEFORE_EDIT, rule::TOOL_AGENTS_BEFORE_EDIT] {
        let (passed, _) = tracker.check(gate, "");
        if !passed {
            return block(gate);
        }
    }

    // Repeated edit: the rule "passing" means the file WAS already edited.
    // An advisory is terminal; once it fires, nothing later is evaluated.
    if !file_path.is_empty() {
        let (already_edited, _) = tracker.check(rule::FILE_ALREADY_EDITED, file_path);
        if already_edited {
            return Verdict::Warn(rules::MSG_WARN_REPEATED_EDIT.to_string());
        }
    }

    // Size heuristic.
    match call {
        ToolCall::Edit {
            old_string,
            new_string,
            ..
        } if old_string.chars().count() > rules::LARGE_EDIT_CHARS
            || new_string.chars().count() > rules::LARGE_EDIT_CHARS =>
        {
            Verdict::Warn(rules::MSG_WARN_LARGE_EDIT.to_string())
        }
        ToolCall::Write { content, .. }
            if content.chars().count() > rules::LARGE_WRITE_CHARS =>
        {
            Verdict::Warn(rules::MSG_WARN_LARGE_EDIT.to_string())
        }
        _ => Verdict::Allow,
    }
}

fn block(rule_name: &str) -> Verdict {
    // The table covers every gating rule; an unknown name here is a bug, so
    // degrade to the rule name itself rather than panicking.
    let msg = rules::block_message(rule_name).unwrap_or(rule_name);
    Verdict::Block(msg.to_string())
}
