//! `hr` binary entry point.
//!
//! Logs go to stderr: in stdio mode stdout is reserved for JSON-RPC.

use std::process::ExitCode;

use clap::Parser;
use hr::cli::{self, Cli};
use hr::config;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_filter);

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "hr failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(directive: &str) {
    let (filter, warning) = config::env_filter(directive);
    if let Some(warning) = warning {
        eprintln!("{warning}");
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
