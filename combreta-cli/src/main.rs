use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod download;
mod pipeline;

use crate::cli::{Cli, Commands};
use combreta_core::CombretaError;

fn main() {
    // COMBRETA_LOG sets the filter unless RUST_LOG is present
    let log_level = std::env::var("COMBRETA_LOG").unwrap_or_else(|_| "warn".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        combreta_utils::error(&format!("Error: {:#}", e));

        let exit_code = e
            .downcast_ref::<CombretaError>()
            .map(CombretaError::exit_code)
            .unwrap_or(1);
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = cli::Settings::load(&cli)?;

    match cli.command {
        Commands::Fetch(args) => cli::commands::fetch::run(args, &settings),
        Commands::Curate(args) => cli::commands::curate::run(args, &settings),
        Commands::Consolidate(args) => cli::commands::consolidate::run(args, &settings),
        Commands::Convert(args) => cli::commands::convert::run(args),
        Commands::Beast(args) => cli::commands::beast::run(args, &settings),
    }
}
