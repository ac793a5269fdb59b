//! # Storefront Console Entry Point
//!
//! ```text
//! storefront-console [--config <path>] [--script <path>] [--pretty]
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use storefront_console::error::ConsoleError;
use storefront_console::state::{ConfigState, SessionState};
use storefront_console::{init_tracing, run_commands};
use tracing::info;

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[arg(long, help = "(Optional) Config file path. Defaults to the platform config dir.")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "(Optional) Command file to run. Defaults to stdin.")]
    pub script: Option<PathBuf>,

    #[arg(long, help = "(Optional) Pretty-print responses.")]
    pub pretty: bool,
}

fn main() -> Result<(), ConsoleError> {
    init_tracing();

    let args = Args::parse();

    // An explicit config must load; the default location may be absent.
    let config = match args.config.as_deref() {
        Some(path) => ConfigState::load(Some(path))?,
        None => ConfigState::load_or_default(None),
    };

    info!(store = %config.store_name, "Starting storefront console");
    let mut session = SessionState::new(config);
    let stdout = io::stdout().lock();

    match args.script {
        Some(path) => {
            let file = File::open(&path)?;
            run_commands(&mut session, BufReader::new(file), stdout, args.pretty)?;
        }
        None => {
            run_commands(&mut session, io::stdin().lock(), stdout, args.pretty)?;
        }
    }

    Ok(())
}
