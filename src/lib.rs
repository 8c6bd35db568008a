//! Timebox - wall-clock timeout governor for single test invocations
//!
//! A [`TimeoutGovernor`] wraps one test method, races it against a deadline
//! and writes a single final result into the execution context. A conclusive
//! failure or error produced by the test itself is never replaced by the
//! timeout failure; timeout enforcement is relaxed while a debugger is
//! attached.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): outcome model, raised faults and ports
//! - **Service Layer** (`services`): governor, strategies, cause-chain unwrapping
//! - **Infrastructure Layer** (`infrastructure`): config, logging, debugger probes, processes
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use timebox::{ExecutionContext, FnTestCommand, TestResult, TimeoutGovernor};
//! use timebox::infrastructure::debugger::ProcessDebuggerProbe;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let command = FnTestCommand::new("suite.case", |_ctx| Ok(TestResult::passed()));
//!     let governor: TimeoutGovernor =
//!         TimeoutGovernor::new(command.into_arc(), 200, Some(std::sync::Arc::new(ProcessDebuggerProbe::new())))?;
//!     let mut context = ExecutionContext::new("suite.case");
//!     governor.execute(&mut context).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, DeliberateFailure, ExecutionContext, FailureSite, ResultState, TestFault, TestResult,
    TestStatus, TimeoutSpec,
};
pub use domain::ports::{CommandTarget, DebuggerProbe, FnTestCommand, TestCommand, TestMethod};
pub use domain::GovernorError;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{
    find_deliberate_failure, CooperativeInterrupt, DeadlineRace, PlatformStrategy,
    TimeoutGovernor, TimeoutStrategy,
};
