//! Command-line argument types.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{probe::ProbeArgs, run::RunArgs};

#[derive(Parser, Debug)]
#[command(name = "timebox")]
#[command(about = "Timebox - run a test body under a wall-clock timeout", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this YAML file instead of .timebox/
    #[arg(long, global = true, env = "TIMEBOX_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a program as a single test under the timeout governor
    Run(RunArgs),

    /// Report whether a debugger is attached
    Probe(ProbeArgs),

    /// Show the effective configuration
    Config,
}
