//! `heimdall <event> [tool_name]` — hook enforcement entry point.
//!
//! Reads the tool-call JSON from stdin, dispatches the lifecycle handler,
//! prints exactly one JSON envelope to stdout, and exits:
//!   0 = allow (or warn), 1 = malformed invocation, 2 = block.
//!
//! `HEIMDALL_DEBUG=1` enables debug logging on stderr.

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::io::Read;

use heimdall_core::tool::parse_stdin;
use heimdall_core::verdict::{encode_initialized, encode_tracked, encode_usage_error, Encoded};
use heimdall_core::ToolCall;
use heimdall_hooks::{post_tool, pre_tool, session_start, stop, Policy};
use heimdall_tracker::{session, TrackerClient};

#[derive(Parser, Debug)]
#[command(
    name = "heimdall",
    version,
    about = "Workflow-policy hook enforcement for Claude Code"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// PreToolUse enforcement: allow, warn, or block the pending tool call
    PreTool {
        /// Name of the tool about to run
        tool_name: String,
    },
    /// PostToolUse tracking: record side effects, never blocks
    PostTool {
        /// Name of the tool that just ran
        tool_name: String,
    },
    /// Stop-hook enforcement: gate completion on review rules
    Stop,
    /// SessionStart initialization: reset tracker state
    SessionStart,
}

fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            // Malformed invocations get a structured error, not clap usage text.
            let msg = e
                .to_string()
                .lines()
                .next()
                .unwrap_or("invalid invocation")
                .trim_start_matches("error: ")
                .to_string();
            finish(encode_usage_error(&msg));
        }
    };

    // Session key computed once at process start and threaded explicitly.
    let session_key = session::resolve();
    tracing::debug!(session_key, "resolved session key");
    let tracker = TrackerClient::from_env(session_key);

    // The host writes the tool-call JSON to stdin for every event.
    let payload = parse_stdin(&read_stdin());

    let encoded = match cli.cmd {
        Command::PreTool { tool_name } => {
            let call = ToolCall::decode(&tool_name, &payload);
            pre_tool::handle(&Policy::from_env(), &tracker, &call).encode()
        }
        Command::PostTool { tool_name } => {
            let call = ToolCall::decode(&tool_name, &payload);
            post_tool::handle(&tracker, &call);
            encode_tracked()
        }
        Command::Stop => stop::handle(&tracker).encode(),
        Command::SessionStart => {
            session_start::handle(&tracker);
            encode_initialized()
        }
    };

    finish(encoded);
}

fn finish(encoded: Encoded) -> ! {
    println!("{}", encoded.stdout);
    std::process::exit(encoded.exit_code);
}

fn read_stdin() -> String {
    let mut buf = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
        tracing::warn!("failed to read stdin: {e}");
    }
    buf
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = if std::env::var_os("HEIMDALL_DEBUG").is_some() {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
