//! `lnurlp`: resolve a Lightning Address into a `lightning:` invoice URI.
//!
//! # Usage
//!
//! ```bash
//! lnurlp alice@pay.example 100 --comment "thanks"
//!
//! # Machine-readable output
//! lnurlp alice@pay.example 100 --json
//!
//! # Configure logging level (logs go to stderr)
//! RUST_LOG=debug lnurlp alice@pay.example 100
//! ```
//!
//! # Environment Variables
//!
//! - `LNURLP_CONFIG` - Path to TOML configuration file (default: `lnurlp.toml`)
//! - `LNURLP_TIMEOUT_SECS` - Override the per-request timeout
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lnurlp_cli::app::{Report, execute};
use lnurlp_cli::{Cli, CliError};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = tokio::select! {
        result = execute(&cli) => result,
        _ = tokio::signal::ctrl_c() => Err(CliError::Interrupted),
    };

    if cli.json {
        print_json(&Report::from_result(&result));
    } else {
        print_plain(&result);
    }

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn print_plain(result: &Result<lnurlp::ResolvedInvoice, CliError>) {
    match result {
        Ok(invoice) => println!("{invoice}"),
        Err(error) => eprintln!("error: {error}"),
    }
}

#[allow(clippy::print_stdout)]
fn print_json(report: &Report) {
    match serde_json::to_string(report) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::error!("Failed to serialize report: {e}"),
    }
}
