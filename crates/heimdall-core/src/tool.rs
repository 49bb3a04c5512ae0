use serde_json::Value;

// ── Closed sub-agent sets ──

/// Sub-agents that gather intelligence; their invocation satisfies the
/// `tool_agents_before_edit` rule on the tracker side.
pub const TOOL_AGENTS: &[&str] = &[
    "serena-agent",
    "context7-agent",
    "websearch-agent",
    "webfetch-agent",
    "sequential-thinking-agent",
    "github-search-agent",
    "claude-docs-agent",
    "git-agent",
    "Explore",
    "Plan",
    "general-purpose",
];

/// Sub-agents that perform adversarial review; their invocation satisfies
/// the `advisors_before_stop` rule on the tracker side.
pub const ADVISORS: &[&str] = &[
    "bash-advisor",
    "c-advisor",
    "nix-advisor",
    "python-advisor",
    "architecture-analyst",
    "conventions-analyst",
    "critical-code-reviewer",
    "lint-interpreter",
    "test-interpreter",
];

/// The sub-agent whose dispatch also counts as sequential thinking.
pub const SEQUENTIAL_THINKING_AGENT: &str = "sequential-thinking-agent";

/// Tool-name prefix of the external sequential-thinking MCP capability.
pub const SEQUENTIAL_THINKING_PREFIX: &str = "mcp__sequential-thinking";

pub fn is_tool_agent(subagent_type: &str) -> bool {
    TOOL_AGENTS.contains(&subagent_type)
}

pub fn is_advisor(subagent_type: &str) -> bool {
    ADVISORS.contains(&subagent_type)
}

// ── Stdin parsing ──

/// Parse the hook stdin payload. Empty or malformed JSON degrades to an
/// empty object — bad caller input must never abort enforcement.
pub fn parse_stdin(stdin: &str) -> Value {
    if stdin.trim().is_empty() {
        return Value::Object(Default::default());
    }
    match serde_json::from_str(stdin) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("failed to parse stdin JSON: {e}");
            Value::Object(Default::default())
        }
    }
}

// ── ToolCall ──

/// A tool invocation, decoded once at the handler boundary.
///
/// The host wraps the actual fields as `{"tool_input": {...}}`; decoding
/// unwraps exactly one such nesting before reading fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Edit {
        file_path: String,
        old_string: String,
        new_string: String,
    },
    Write {
        file_path: String,
        content: String,
    },
    NotebookEdit {
        file_path: String,
    },
    TodoWrite,
    Task {
        subagent_type: String,
    },
    SequentialThinking,
    Other,
}

impl ToolCall {
    /// Decode a tool call from its name and the stdin payload.
    pub fn decode(tool_name: &str, input: &Value) -> ToolCall {
        let input = unwrap_tool_input(input);
        match tool_name {
            "Edit" => ToolCall::Edit {
                file_path: get_str(input, "file_path"),
                old_string: get_str(input, "old_string"),
                new_string: get_str(input, "new_string"),
            },
            "Write" => ToolCall::Write {
                file_path: get_str(input, "file_path"),
                content: get_str(input, "content"),
            },
            "NotebookEdit" => ToolCall::NotebookEdit {
                file_path: get_str(input, "file_path"),
            },
            "TodoWrite" => ToolCall::TodoWrite,
            "Task" => ToolCall::Task {
                subagent_type: get_str(input, "subagent_type"),
            },
            name if name.starts_with(SEQUENTIAL_THINKING_PREFIX) => ToolCall::SequentialThinking,
            _ => ToolCall::Other,
        }
    }

    /// True for the tools that constitute file editing.
    pub fn is_file_edit(&self) -> bool {
        matches!(
            self,
            ToolCall::Edit { .. } | ToolCall::Write { .. } | ToolCall::NotebookEdit { .. }
        )
    }

    /// Target path for file-edit tools; `None` otherwise.
    pub fn file_path(&self) -> Option<&str> {
        match self {
            ToolCall::Edit { file_path, .. }
            | ToolCall::Write { file_path, .. }
            | ToolCall::NotebookEdit { file_path } => Some(file_path),
            _ => None,
        }
    }
}

/// Unwrap one level of `{"tool_input": {...}}` nesting if present.
fn unwrap_tool_input(input: &Value) -> &Value {
    match input.get("tool_input") {
        Some(inner) if inner.is_object() => inner,
        _ => input,
    }
}

fn get_str(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(|x| x.as_str())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_edit_reads_fields() {
        let input = json!({"file_path": "/tmp/a.rs", "old_string": "x", "new_string": "y"});
        let call = ToolCall::decode("Edit", &input);
        assert_eq!(
            call,
            ToolCall::Edit {
                file_path: "/tmp/a.rs".into(),
                old_string: "x".into(),
                new_string: "y".into(),
            }
        );
        assert!(call.is_file_edit());
        assert_eq!(call.file_path(), Some("/tmp/a.rs"));
    }

    #[test]
    fn decode_unwraps_nested_tool_input_once() {
        let input = json!({"tool_input": {"file_path": "/tmp/b.py", "content": "pass"}});
        let call = ToolCall::decode("Write", &input);
        assert_eq!(call.file_path(), Some("/tmp/b.py"));
    }

    #[test]
    fn decode_ignores_non_object_tool_input() {
        let input = json!({"tool_input": "not an object", "file_path": "/tmp/c"});
        let call = ToolCall::decode("NotebookEdit", &input);
        assert_eq!(call.file_path(), Some("/tmp/c"));
    }

    #[test]
    fn decode_missing_fields_default_empty() {
        let call = ToolCall::decode("Edit", &json!({}));
        assert_eq!(call.file_path(), Some(""));
    }

    #[test]
    fn decode_sequential_thinking_by_prefix() {
        let call = ToolCall::decode("mcp__sequential-thinking__sequentialthinking", &json!({}));
        assert_eq!(call, ToolCall::SequentialThinking);
    }

    #[test]
    fn decode_unknown_tool_is_other() {
        assert_eq!(ToolCall::decode("Bash", &json!({})), ToolCall::Other);
        assert_eq!(ToolCall::decode("Grep", &json!({})), ToolCall::Other);
        assert!(!ToolCall::decode("Bash", &json!({})).is_file_edit());
    }

    #[test]
    fn parse_stdin_handles_empty_and_malformed() {
        assert_eq!(parse_stdin(""), json!({}));
        assert_eq!(parse_stdin("   \n"), json!({}));
        assert_eq!(parse_stdin("{not json"), json!({}));
        assert_eq!(parse_stdin(r#"{"a": 1}"#), json!({"a": 1}));
    }

    #[test]
    fn subagent_sets_are_disjoint() {
        for agent in TOOL_AGENTS {
            assert!(!is_advisor(agent), "{agent} in both sets");
        }
        assert!(is_tool_agent("git-agent"));
        assert!(is_advisor("critical-code-reviewer"));
        assert!(!is_tool_agent("docs-reviewer"));
        assert!(is_tool_agent(SEQUENTIAL_THINKING_AGENT));
    }
}
