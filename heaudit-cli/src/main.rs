//! heaudit - validate a home energy audit record
//!
//! Takes one record as a JSON argument, prints the bucketed result as JSON on
//! stdout and exits 0 whatever the record contains. Only an argument that is
//! not JSON at all exits non-zero.

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use heaudit_cli::{exit_code, load_config, run, BuildInfo};
use heaudit_common::Validator;

/// Command-line arguments for heaudit
#[derive(Parser, Debug)]
#[command(name = "heaudit")]
#[command(about = "Cross-field validation for home energy audit records")]
#[command(version)]
struct Args {
    /// Audit record as JSON text (flat keys or nested tree)
    record: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let (config, config_warning) = load_config();

    // Logs go to stderr so stdout carries only the result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("{}", BuildInfo::current());
    if let Some(message) = config_warning {
        warn!("{}", message);
    }

    match run(&Validator::new(config), &args.record) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
