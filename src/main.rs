//! Case management CLI
//!
//! Command-line interface for IBM Cloud support cases

use anyhow::Context;
use clap::Parser;
use platform_services_sdk::cli::{Cli, Runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Initialize logging; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.name();
    Runner::new(cli)
        .run()
        .await
        .with_context(|| format!("case-management {command} failed"))
}
