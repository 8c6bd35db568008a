//! Timebox CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use timebox::cli::commands::{config, probe, run};
use timebox::cli::{Cli, Commands};
use timebox::infrastructure::config::ConfigLoader;
use timebox::infrastructure::logging::LoggerImpl;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match dispatch(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => timebox::cli::handle_error(err, json),
    }
}

fn dispatch(cli: Cli) -> Result<bool> {
    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&loaded.logging)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let outcome = runtime.block_on(async {
        match cli.command {
            Commands::Run(args) => run::execute(args, &loaded, cli.json).await,
            Commands::Probe(args) => probe::execute(&args, &loaded, cli.json).map(|()| true),
            Commands::Config => config::execute(&loaded, cli.json).map(|()| true),
        }
    });

    // A test body abandoned after its deadline must not keep the process alive.
    runtime.shutdown_background();
    outcome
}
