use async_trait::async_trait;
use std::time::Instant;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::domain::models::{TestResult, TimeoutSpec};
use crate::services::body_runner::{classify, from_join, run_to_completion, BodyOutcome};
use crate::services::strategy::{Invocation, TimeoutStrategy};

/// Races the body, running on the blocking pool, against a deadline.
///
/// No forced termination is attempted. When the deadline wins and no
/// debugger is attached, the body keeps running in the background and its
/// eventual outcome is never observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlineRace;

enum Race {
    Completed(Result<BodyOutcome, JoinError>),
    DeadlineElapsed,
}

impl DeadlineRace {
    /// Decide the result once a debugger-attached body has fully completed.
    ///
    /// Raised faults are classified naturally (an unexpected error is
    /// reported as such, a deliberate failure keeps its own state). Only a
    /// non-failing result that finished after the deadline becomes a timeout.
    fn settle_after_completion(
        outcome: BodyOutcome,
        deadline_elapsed: bool,
        timeout: TimeoutSpec,
    ) -> TestResult {
        match outcome {
            Ok(result) if deadline_elapsed && !result.is_failure() => Self::timeout_result(timeout),
            other => classify(other),
        }
    }
}

#[async_trait]
impl TimeoutStrategy for DeadlineRace {
    const NAME: &'static str = "deadline-race";
    const TIMEOUT_TEMPLATE: &'static str = "Test exceeded Timeout value {timeout}ms.";

    async fn run(&self, invocation: Invocation) -> TestResult {
        let Invocation {
            command,
            context,
            timeout,
            debugger_attached,
        } = invocation;

        let launched_at = Instant::now();
        let mut worker =
            tokio::task::spawn_blocking(move || run_to_completion(command.as_ref(), &context));

        let deadline = tokio::time::sleep(timeout.as_duration());
        tokio::pin!(deadline);

        let race = tokio::select! {
            joined = &mut worker => Race::Completed(joined),
            () = &mut deadline => Race::DeadlineElapsed,
        };

        match race {
            Race::Completed(joined) => {
                debug!(elapsed = ?launched_at.elapsed(), "test body completed before the deadline");
                Self::settle_after_completion(from_join(joined), false, timeout)
            }
            Race::DeadlineElapsed if !debugger_attached => {
                warn!(
                    timeout_ms = timeout.millis(),
                    "deadline elapsed; abandoning the test body"
                );
                // Dropping the handle detaches the worker.
                drop(worker);
                Self::timeout_result(timeout)
            }
            Race::DeadlineElapsed => {
                info!(
                    timeout_ms = timeout.millis(),
                    "deadline elapsed with a debugger attached; waiting for the test body"
                );
                let outcome = from_join(worker.await);
                debug!(elapsed = ?launched_at.elapsed(), "test body completed after the deadline");
                Self::settle_after_completion(outcome, true, timeout)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ResultState, TestFault};

    fn timeout() -> TimeoutSpec {
        TimeoutSpec::from_millis(100).expect("valid timeout")
    }

    #[test]
    fn test_timeout_message_format() {
        let result = DeadlineRace::timeout_result(timeout());
        assert_eq!(result.state().label(), "Test exceeded Timeout value 100ms.");
        assert_eq!(result.message(), Some("Test exceeded Timeout value 100ms."));
    }

    #[test]
    fn test_late_pass_becomes_timeout() {
        let result = DeadlineRace::settle_after_completion(Ok(TestResult::passed()), true, timeout());
        assert_eq!(result, DeadlineRace::timeout_result(timeout()));
    }

    #[test]
    fn test_late_failure_is_kept() {
        let result = DeadlineRace::settle_after_completion(
            Err(TestFault::fail("The test has failed")),
            true,
            timeout(),
        );
        assert_eq!(result.state(), &ResultState::failure());
        assert_eq!(result.message(), Some("The test has failed"));
    }

    #[test]
    fn test_late_error_is_kept() {
        let result = DeadlineRace::settle_after_completion(
            Err(TestFault::unexpected("connection reset")),
            true,
            timeout(),
        );
        assert!(result.state().is_error());
    }

    #[test]
    fn test_late_returned_failure_is_kept() {
        let returned = TestResult::new(ResultState::failure(), Some("returned failure".into()));
        let result =
            DeadlineRace::settle_after_completion(Ok(returned.clone()), true, timeout());
        assert_eq!(result, returned);
    }

    #[test]
    fn test_on_time_pass_is_kept() {
        let result = DeadlineRace::settle_after_completion(Ok(TestResult::passed()), false, timeout());
        assert_eq!(result, TestResult::passed());
    }
}
