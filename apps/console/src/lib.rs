//! # Storefront Console Library
//!
//! Session layer for the storefront "new transaction" screen. Reads one
//! JSON command per line, applies it to the open transaction and writes
//! one JSON response per line.
//!
//! ## Module Organization
//! ```text
//! storefront_console/
//! ├── lib.rs          ◄─── You are here (logging, command loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration loading
//! │   └── session.rs  ◄─── Open transaction + lookups
//! ├── commands/
//! │   ├── mod.rs      ◄─── Wire format and dispatch
//! │   ├── cart.rs     ◄─── Line item commands
//! │   ├── customer.rs ◄─── Customer commands
//! │   ├── product.rs  ◄─── Search and add-product form
//! │   ├── checkout.rs ◄─── Validate, submit, reset
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Streams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   script / stdin ──► run_commands() ──► stdout   (JSON responses)       │
//! │                            │                                            │
//! │                            └──────────► stderr   (tracing logs)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{BufRead, Write};

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use error::ConsoleError;
use state::SessionState;

/// Counts from one run of the command loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub commands: usize,
    pub failures: usize,
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command
/// - `RUST_LOG=storefront=trace` - Trace for storefront crates only
/// - Default: INFO level
///
/// Logs go to stderr; stdout carries only responses.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs every command line from `input`, writing one response per line.
///
/// Blank lines and lines starting with `#` are skipped. A command that
/// fails produces an error response and the loop continues; only I/O
/// failures stop it.
pub fn run_commands<R: BufRead, W: Write>(
    session: &mut SessionState,
    input: R,
    mut output: W,
    pretty: bool,
) -> Result<RunStats, ConsoleError> {
    let mut stats = RunStats::default();

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let response = commands::handle_line(session, line);
        stats.commands += 1;
        if !response.ok {
            stats.failures += 1;
            debug!(line = %line, "Command failed");
        }

        if pretty {
            serde_json::to_writer_pretty(&mut output, &response)?;
        } else {
            serde_json::to_writer(&mut output, &response)?;
        }
        writeln!(output)?;
        output.flush()?;
    }

    info!(
        commands = stats.commands,
        failures = stats.failures,
        "Command stream finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;
    use std::io::Cursor;

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let mut session = SessionState::new(ConfigState::default());
        let input = "\n# add the blocks\n{\"command\": \"add_to_cart\", \"productId\": \"1\"}\n\n";
        let mut output = Vec::new();

        let stats = run_commands(&mut session, Cursor::new(input), &mut output, false).unwrap();

        assert_eq!(stats, RunStats { commands: 1, failures: 0 });
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_bad_line_does_not_stop_the_loop() {
        let mut session = SessionState::new(ConfigState::default());
        let input = "oops\n{\"command\": \"get_draft\"}\n";
        let mut output = Vec::new();

        let stats = run_commands(&mut session, Cursor::new(input), &mut output, false).unwrap();

        assert_eq!(stats, RunStats { commands: 2, failures: 1 });
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("{\"ok\":false"));
        assert!(lines[1].starts_with("{\"ok\":true"));
    }
}
