use serde_json::json;

// ── Exit codes ──

/// Allow / warn: the host proceeds with the tool call.
pub const EXIT_ALLOW: i32 = 0;
/// Malformed invocation (bad arguments, unknown event).
pub const EXIT_USAGE: i32 = 1;
/// Block: the host aborts the tool call and shows `reason` to the agent.
pub const EXIT_BLOCK: i32 = 2;

// ── Verdict ──

/// Terminal outcome of a single hook invocation.
///
/// Exactly one verdict is produced per process; the caller encodes it,
/// prints the envelope, and exits.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Allow,
    /// Allow, but attach an advisory message.
    Warn(String),
    /// Refuse the action with an explanation.
    Block(String),
}

impl Verdict {
    pub fn is_block(&self) -> bool {
        matches!(self, Verdict::Block(_))
    }

    /// Encode as the host's decision envelope.
    pub fn encode(&self) -> Encoded {
        match self {
            Verdict::Allow => Encoded {
                stdout: json!({"decision": "approve"}).to_string(),
                exit_code: EXIT_ALLOW,
            },
            Verdict::Warn(msg) => Encoded {
                stdout: json!({"decision": "approve", "warning": msg}).to_string(),
                exit_code: EXIT_ALLOW,
            },
            Verdict::Block(reason) => Encoded {
                stdout: json!({"decision": "block", "reason": reason}).to_string(),
                exit_code: EXIT_BLOCK,
            },
        }
    }
}

// ── Encoded response ──

/// One JSON line for stdout plus the process exit code.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub stdout: String,
    pub exit_code: i32,
}

/// Acknowledgment for post-tool: observation only, always succeeds.
pub fn encode_tracked() -> Encoded {
    Encoded {
        stdout: json!({"status": "tracked"}).to_string(),
        exit_code: EXIT_ALLOW,
    }
}

/// Acknowledgment for session-start.
pub fn encode_initialized() -> Encoded {
    Encoded {
        stdout: json!({"status": "initialized"}).to_string(),
        exit_code: EXIT_ALLOW,
    }
}

/// Structured usage error for malformed invocations.
pub fn encode_usage_error(msg: &str) -> Encoded {
    Encoded {
        stdout: json!({"error": msg}).to_string(),
        exit_code: EXIT_USAGE,
    }
}
