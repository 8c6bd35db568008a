//! Implementation of the `timebox probe` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, DebuggerMode};
use crate::infrastructure::debugger::probe_for_mode;

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Override debugger detection: auto, attached or detached
    #[arg(long)]
    pub mode: Option<DebuggerMode>,
}

#[derive(Debug, Serialize)]
pub struct ProbeOutput {
    pub mode: DebuggerMode,
    pub attached: bool,
}

impl CommandOutput for ProbeOutput {
    fn to_human(&self) -> String {
        let state = if self.attached { "attached" } else { "not attached" };
        format!("Debugger {state} (mode: {:?})", self.mode)
    }
}

pub fn execute(args: &ProbeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let mode = args.mode.unwrap_or(config.debugger.mode);
    let probe = probe_for_mode(mode);

    let output_data = ProbeOutput {
        mode,
        attached: probe.is_attached(),
    };
    output(&output_data, json_mode);
    Ok(())
}
