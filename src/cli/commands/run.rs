//! Implementation of the `timebox run` command.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use console::style;
use serde::Serialize;
use std::time::Instant;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{
    Config, DebuggerMode, ExecutionContext, FailureSite, TestResult, TestStatus,
};
use crate::infrastructure::debugger::probe_for_mode;
use crate::infrastructure::process::ProcessTestCommand;
use crate::services::{PlatformStrategy, TimeoutGovernor, TimeoutStrategy};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Timeout in milliseconds (defaults to governor.default_timeout_ms)
    #[arg(long, short = 't', allow_negative_numbers = true)]
    pub timeout_ms: Option<i64>,

    /// Override debugger detection: auto, attached or detached
    #[arg(long)]
    pub debugger: Option<DebuggerMode>,

    /// Test name used in logs and the report (defaults to the program)
    #[arg(long)]
    pub name: Option<String>,

    /// Program and arguments to run
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub test: String,
    pub status: TestStatus,
    pub label: String,
    pub message: Option<String>,
    pub site: FailureSite,
    pub timeout_ms: u64,
    pub strategy: &'static str,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u128,
}

impl RunOutput {
    fn new(
        test: String,
        result: &TestResult,
        timeout_ms: u64,
        started_at: DateTime<Utc>,
        elapsed_ms: u128,
    ) -> Self {
        Self {
            test,
            status: result.status(),
            label: result.state().label().to_string(),
            message: result.message().map(str::to_string),
            site: result.state().site(),
            timeout_ms,
            strategy: PlatformStrategy::NAME,
            started_at,
            elapsed_ms,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let status = match self.status {
            TestStatus::Passed => style("PASSED").green().bold().to_string(),
            TestStatus::Failed => style("FAILED").red().bold().to_string(),
        };

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["Field", "Value"]);
        table.add_row(vec!["Test".to_string(), self.test.clone()]);
        table.add_row(vec!["Status".to_string(), status]);
        if !self.label.is_empty() {
            table.add_row(vec!["Label".to_string(), self.label.clone()]);
        }
        if let Some(message) = &self.message {
            table.add_row(vec!["Message".to_string(), message.clone()]);
        }
        table.add_row(vec!["Site".to_string(), self.site.to_string()]);
        table.add_row(vec!["Timeout".to_string(), format!("{}ms", self.timeout_ms)]);
        table.add_row(vec!["Strategy".to_string(), self.strategy.to_string()]);
        table.add_row(vec!["Started".to_string(), self.started_at.to_rfc3339()]);
        table.add_row(vec!["Elapsed".to_string(), format!("{}ms", self.elapsed_ms)]);
        table.to_string()
    }
}

/// Run the program under the governor. Returns whether the test passed.
pub async fn execute(args: RunArgs, config: &Config, json_mode: bool) -> Result<bool> {
    let (program, program_args) = args
        .command
        .split_first()
        .context("No program given to run")?;
    let name = args.name.clone().unwrap_or_else(|| program.clone());
    let timeout_ms = args
        .timeout_ms
        .unwrap_or(config.governor.default_timeout_ms);
    let mode = args.debugger.unwrap_or(config.debugger.mode);

    let command = ProcessTestCommand::new(name.clone(), program.clone(), program_args.to_vec())
        .with_stdout_to_stderr(json_mode);
    let governor: TimeoutGovernor =
        TimeoutGovernor::new(std::sync::Arc::new(command), timeout_ms, Some(probe_for_mode(mode)))
            .context("Invalid run arguments")?;
    let timeout = governor.timeout();

    let started_at = Utc::now();
    let started = Instant::now();
    let mut context = ExecutionContext::new(name.clone());
    let result = governor.execute(&mut context).await;

    let report = RunOutput::new(
        name,
        &result,
        timeout.millis(),
        started_at,
        started.elapsed().as_millis(),
    );
    output(&report, json_mode);
    Ok(report.passed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ResultState;

    #[test]
    fn test_run_output_from_failure() {
        let result = TestResult::new(ResultState::failure(), Some("exit 3".to_string()));
        let report = RunOutput::new("proc".to_string(), &result, 100, Utc::now(), 12);

        assert!(!report.passed());
        let json = report.to_json();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["message"], "exit 3");
        assert_eq!(json["timeout_ms"], 100);
        assert!(report.to_human().contains("exit 3"));
    }
}
