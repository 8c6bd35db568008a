//! Timeout enforcement strategies.
//!
//! Exactly one strategy is active per build: [`PlatformStrategy`] resolves to
//! [`DeadlineRace`] unless the `cooperative-interrupt` feature is enabled.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::models::{ExecutionContext, ResultState, TestResult, TestStatus, TimeoutSpec};
use crate::domain::ports::TestCommand;

pub use crate::services::cooperative_interrupt::CooperativeInterrupt;
pub use crate::services::deadline_race::DeadlineRace;

/// The strategy selected for this build.
#[cfg(not(feature = "cooperative-interrupt"))]
pub type PlatformStrategy = DeadlineRace;

/// The strategy selected for this build.
#[cfg(feature = "cooperative-interrupt")]
pub type PlatformStrategy = CooperativeInterrupt;

/// Everything a strategy needs for one governed invocation.
pub struct Invocation {
    pub command: Arc<dyn TestCommand>,
    /// The worker's view of the execution context
    pub context: ExecutionContext,
    pub timeout: TimeoutSpec,
    /// Snapshot taken once by the governor
    pub debugger_attached: bool,
}

/// A way of racing a test body against its deadline.
#[async_trait]
pub trait TimeoutStrategy: Default + Send + Sync + 'static {
    /// Short name used in logs
    const NAME: &'static str;

    /// Timeout message with a `{timeout}` placeholder for the milliseconds.
    const TIMEOUT_TEMPLATE: &'static str;

    /// The synthesized failure reported when the deadline wins.
    fn timeout_result(timeout: TimeoutSpec) -> TestResult {
        let text = Self::TIMEOUT_TEMPLATE.replace("{timeout}", &timeout.millis().to_string());
        TestResult::new(ResultState::new(TestStatus::Failed, text.clone()), Some(text))
    }

    /// Run the invocation and decide its final result.
    async fn run(&self, invocation: Invocation) -> TestResult;
}
