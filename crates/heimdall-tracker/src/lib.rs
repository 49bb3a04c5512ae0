//! Client facade over the external activity tracker.
//!
//! The tracker is a black-box CLI (`init`, `cleanup`, `get`, `track <type>
//! [data]`, `check <rule> [extra]`) that owns all session state. This crate
//! exposes it behind the [`ActivityTracker`] trait so policy handlers never
//! see the transport, and implements the trait with a bounded-timeout
//! subprocess call per operation.
//!
//! Failure policy: fail-open for tracking (a dropped track call must never
//! stop harmless tool use), fail-closed for checks (a failed check must not
//! silently grant an action).

pub mod session;

use serde_json::Value;
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Environment variable carrying the session correlation key to the tracker.
pub const SESSION_KEY_ENV: &str = "HEIMDALL_SESSION_KEY";
/// Environment variable overriding the tracker command.
pub const TRACKER_CMD_ENV: &str = "HEIMDALL_TRACKER_CMD";
/// Tracker command used when `HEIMDALL_TRACKER_CMD` is unset.
pub const DEFAULT_TRACKER_CMD: &str = "activity-tracker";

/// Every tracker call is bounded by this timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("failed to run tracker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("tracker timed out after {0:?}")]
    Timeout(Duration),
}

// ── Trait ──

/// Abstract capability interface over the external state tracker.
///
/// Handlers depend on this trait, so the transport (subprocess here, an
/// in-memory fake in tests) is swappable without touching policy logic.
pub trait ActivityTracker {
    /// Record an activity. Fire-and-forget: failures are logged, never raised.
    fn track(&self, event_type: &str, data: &str);

    /// Evaluate a named rule. `passed` is the child's exit-code zero-ness;
    /// `detail` is its parsed stdout. Any transport failure counts as failed.
    fn check(&self, rule: &str, extra: &str) -> (bool, Value);

    /// Fetch the full session state, `None` when unavailable or unparsable.
    fn get(&self) -> Option<Value>;

    /// Re-initialize session state.
    fn init(&self);

    /// Purge stale state.
    fn cleanup(&self);
}

// ── Subprocess transport ──

/// Subprocess-backed [`ActivityTracker`]: one child process per call, the
/// session key injected via [`SESSION_KEY_ENV`], every call bounded by a
/// fixed timeout. No retries.
pub struct TrackerClient {
    program: String,
    session_key: i64,
    timeout: Duration,
}

impl TrackerClient {
    pub fn new(program: impl Into<String>, session_key: i64) -> Self {
        Self {
            program: program.into(),
            session_key,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Resolve the tracker command from the environment.
    pub fn from_env(session_key: i64) -> Self {
        let program =
            std::env::var(TRACKER_CMD_ENV).unwrap_or_else(|_| DEFAULT_TRACKER_CMD.to_string());
        Self::new(program, session_key)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one tracker invocation, returning (exit_code, stdout).
    ///
    /// Single-threaded by contract, so the wait is a `try_wait` poll against
    /// a deadline rather than an async timeout. The tracker emits a single
    /// JSON line, well under the pipe buffer, so reading stdout after exit
    /// cannot deadlock.
    fn run(&self, args: &[&str]) -> Result<(i32, String), TrackerError> {
        tracing::debug!(program = %self.program, ?args, "running tracker");
        let mut child = Command::new(&self.program)
            .args(args)
            .env(SESSION_KEY_ENV, self.session_key.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait()? {
                Some(status) => {
                    let mut stdout = String::new();
                    if let Some(mut pipe) = child.stdout.take() {
                        let _ = pipe.read_to_string(&mut stdout);
                    }
                    let code = status.code().unwrap_or(-1);
                    tracing::debug!(code, out = %stdout.trim(), "tracker finished");
                    return Ok((code, stdout));
                }
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(TrackerError::Timeout(self.timeout));
                }
                None => std::thread::sleep(Duration::from_millis(10)),
            }
        }
    }
}

impl ActivityTracker for TrackerClient {
    fn track(&self, event_type: &str, data: &str) {
        let mut args = vec!["track", event_type];
        if !data.is_empty() {
            args.push(data);
        }
        if let Err(e) = self.run(&args) {
            tracing::warn!("track {event_type} dropped: {e}");
        }
    }

    fn check(&self, rule: &str, extra: &str) -> (bool, Value) {
        let mut args = vec!["check", rule];
        if !extra.is_empty() {
            args.push(extra);
        }
        match self.run(&args) {
            Ok((code, stdout)) => {
                let detail = serde_json::from_str(&stdout).unwrap_or_else(|_| {
                    tracing::debug!(rule, raw = %stdout.trim(), "tracker check output was not JSON");
                    serde_json::json!({"passed": false, "reason": "parse failure"})
                });
                (code == 0, detail)
            }
            Err(e) => {
                tracing::warn!("check {rule} failed: {e}");
                (
                    false,
                    serde_json::json!({"passed": false, "reason": e.to_string()}),
                )
            }
        }
    }

    fn get(&self) -> Option<Value> {
        match self.run(&["get"]) {
            Ok((_, stdout)) => serde_json::from_str(&stdout).ok(),
            Err(e) => {
                tracing::warn!("get failed: {e}");
                None
            }
        }
    }

    fn init(&self) {
        if let Err(e) = self.run(&["init"]) {
            tracing::warn!("init dropped: {e}");
        }
    }

    fn cleanup(&self) {
        if let Err(e) = self.run(&["cleanup"]) {
            tracing::warn!("cleanup dropped: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Write an executable stub tracker script and return its path.
    fn stub_tracker(dir: &Path, body: &str) -> String {
        let path = dir.join("tracker.sh");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().to_string()
    }

    fn client(program: String) -> TrackerClient {
        TrackerClient::new(program, 4242).with_timeout(Duration::from_millis(500))
    }

    #[test]
    fn check_passes_on_exit_zero_with_detail() {
        let dir = tempfile::tempdir().unwrap();
        let prog = stub_tracker(dir.path(), r#"echo '{"passed": true, "count": 3}'"#);
        let (passed, detail) = client(prog).check("todo_before_edit", "");
        assert!(passed);
        assert_eq!(detail["count"], 3);
    }

    #[test]
    fn check_fails_on_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let prog = stub_tracker(dir.path(), r#"echo '{"passed": false}'; exit 1"#);
        let (passed, detail) = client(prog).check("todo_before_edit", "");
        assert!(!passed);
        assert_eq!(detail["passed"], false);
    }

    #[test]
    fn check_synthesizes_detail_on_non_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let prog = stub_tracker(dir.path(), "echo not-json-at-all");
        let (passed, detail) = client(prog).check("advisors_before_stop", "");
        // Exit code stays authoritative even when stdout is garbage.
        assert!(passed);
        assert_eq!(detail["reason"], "parse failure");
    }

    #[test]
    fn check_fails_closed_on_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let prog = stub_tracker(dir.path(), "sleep 5; echo '{}'");
        let (passed, _) = client(prog).check("todo_before_edit", "");
        assert!(!passed);
    }

    #[test]
    fn check_fails_closed_on_spawn_error() {
        let (passed, _) = client("/nonexistent/tracker-bin".into()).check("r", "");
        assert!(!passed);
    }

    #[test]
    fn track_swallows_timeout_and_spawn_errors() {
        let dir = tempfile::tempdir().unwrap();
        let prog = stub_tracker(dir.path(), "sleep 5");
        client(prog).track("file_edit", "/tmp/a.rs");
        client("/nonexistent/tracker-bin".into()).track("todo_created", "");
        // Reaching here without a panic is the assertion.
    }

    #[test]
    fn check_forwards_extra_argument() {
        let dir = tempfile::tempdir().unwrap();
        // Echo argv back so the test can see what the tracker received.
        let prog = stub_tracker(dir.path(), r#"echo "{\"args\": \"$*\"}""#);
        let (passed, detail) = client(prog).check("file_already_edited", "/tmp/a.rs");
        assert!(passed);
        assert_eq!(detail["args"], "check file_already_edited /tmp/a.rs");
    }

    #[test]
    fn session_key_is_injected_into_child_env() {
        let dir = tempfile::tempdir().unwrap();
        let prog = stub_tracker(
            dir.path(),
            r#"echo "{\"key\": \"$HEIMDALL_SESSION_KEY\"}""#,
        );
        let (_, detail) = client(prog).check("todo_before_edit", "");
        assert_eq!(detail["key"], "4242");
    }

    #[test]
    fn get_returns_parsed_state_or_none() {
        let dir = tempfile::tempdir().unwrap();
        let prog = stub_tracker(dir.path(), r#"echo '{"files_edited": ["a.rs"]}'"#);
        let state = client(prog).get().unwrap();
        assert_eq!(state["files_edited"][0], "a.rs");

        let garbled = stub_tracker(dir.path(), "echo garbage");
        assert!(client(garbled).get().is_none());
        assert!(client("/nonexistent/tracker-bin".into()).get().is_none());
    }
}
