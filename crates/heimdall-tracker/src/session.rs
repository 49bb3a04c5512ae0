//! Session identity resolution.
//!
//! The host spawns a fresh process per hook event; without a stable
//! correlation key, session state would fragment per-invocation. The key is
//! the process-group ID of our parent, read from `/proc/<ppid>/stat`, so
//! every hook fired within one interactive session resolves the same value
//! regardless of subprocess depth.

use std::fs;

/// Resolve the session correlation key for this invocation.
///
/// Falls back to the parent PID itself when the stat record is missing or
/// malformed — resolution never fails.
pub fn resolve() -> i64 {
    let ppid = std::os::unix::process::parent_id() as i64;
    match fs::read_to_string(format!("/proc/{ppid}/stat")) {
        Ok(stat) => parse_stat_pgid(&stat).unwrap_or(ppid),
        Err(_) => ppid,
    }
}

/// Extract the process-group ID from a `/proc/<pid>/stat` line.
///
/// The command name is delimited by parentheses and may itself contain `)`,
/// so fields are taken after the *last* closing parenthesis: state, ppid,
/// then pgrp.
fn parse_stat_pgid(stat: &str) -> Option<i64> {
    let rest = &stat[stat.rfind(')')? + 1..];
    rest.split_whitespace().nth(2)?.parse().ok()
}
