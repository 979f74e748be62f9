//! cert-checker - TLS certificate monitoring and chain validation
//!
//! This tool provides functionality for:
//! - Checking certificates of configured or ad-hoc hosts
//! - Validating certificate chains against a truststore
//! - Inspecting certificate files

use anyhow::Result;
use cert_checker::cli::{Cli, Commands};
use cert_checker::commands;
use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Handle color preference
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    match cli.command {
        Commands::Check(args) => commands::run_check(args).await,
        Commands::Validate(args) => commands::run_validate(args),
        Commands::Inspect(args) => commands::run_inspect(args),
    }
}
