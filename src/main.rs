//! zora-coins
//!
//! Creates Zora content coins on Base and records them in a local registry.
//!
//! # Architecture Overview
//!
//! ```text
//!   zora-coins create ──▶ credentials ──▶ image check ──▶ balance (RPC)
//!                                                            │
//!                                                            ▼
//!                          registry ◀── submit (RPC) ◀── coin API ◀── metadata upload
//!                          (append)      (skipped in --preview)
//!
//!   zora-coins list   ──▶ registry (load) ──▶ render
//!   zora-coins upload ──▶ image check ──▶ metadata upload ──▶ metadata URI
//! ```

use clap::Parser;
use std::process::ExitCode;

use zora_coins::commands::{self, Cli, CommandError};
use zora_coins::config;
use zora_coins::observability;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(commands::parse_exit_code(&e));
        }
    };

    let config = match config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report(&CommandError::from(e));
            return ExitCode::FAILURE;
        }
    };

    observability::logging::init(&config.observability);
    tracing::debug!(command = ?cli.command, "Starting");

    match commands::run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &CommandError) {
    eprintln!("\nError: {}", err);
    for hint in err.hints() {
        eprintln!("   {}", hint);
    }
}
