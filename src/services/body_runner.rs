//! Running a wrapped test body plus teardown on a worker thread, and turning
//! what it produced into a [`TestResult`].

use std::panic::{self, AssertUnwindSafe};
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::domain::models::{ExecutionContext, FailureSite, ResultState, TestFault, TestResult};
use crate::domain::ports::TestCommand;
use crate::services::cause_chain::find_deliberate_failure;

/// What the worker hands back to the governor.
pub type BodyOutcome = Result<TestResult, TestFault>;

/// Run the body and then its teardown, catching panics from both.
///
/// Teardown always runs. A teardown failure after a passing body turns the
/// outcome into an error attributed to [`FailureSite::TearDown`]; after a
/// failed body the body's outcome wins and the teardown failure is logged.
pub fn run_to_completion(command: &dyn TestCommand, context: &ExecutionContext) -> BodyOutcome {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| command.execute(context)))
        .unwrap_or_else(|payload| Err(TestFault::from_panic(payload)));

    let tear_down = panic::catch_unwind(AssertUnwindSafe(|| command.tear_down(context)))
        .unwrap_or_else(|payload| Err(TestFault::from_panic(payload)));

    match (outcome, tear_down) {
        (outcome, Ok(())) => outcome,
        (Ok(result), Err(fault)) if !result.is_failure() => Ok(TestResult::new(
            ResultState::error().with_site(FailureSite::TearDown),
            Some(format!("TearDown : {fault}")),
        )),
        (outcome, Err(fault)) => {
            warn!(
                test = %context.test_name(),
                error = %fault,
                "teardown failed after a failed test body; keeping the body outcome"
            );
            outcome
        }
    }
}

/// Flatten a worker join into a body outcome.
///
/// Panics are already caught inside [`run_to_completion`]; a join error here
/// means the worker itself was lost.
pub fn from_join(joined: Result<BodyOutcome, JoinError>) -> BodyOutcome {
    joined.unwrap_or_else(|err| {
        if err.is_panic() {
            Err(TestFault::from_panic(err.into_panic()))
        } else {
            Err(TestFault::unexpected(format!("test worker was lost: {err}")))
        }
    })
}

/// Classify a natural outcome.
///
/// A deliberate failure anywhere in the cause chain becomes its own state and
/// message; any other raised fault becomes an "Error" carrying the fault text.
pub fn classify(outcome: BodyOutcome) -> TestResult {
    match outcome {
        Ok(result) => result,
        Err(fault) => match find_deliberate_failure(&fault) {
            Some(failure) => {
                debug!(message = %failure.message(), "body raised a deliberate failure");
                TestResult::new(failure.state().clone(), Some(failure.message().to_string()))
            }
            None => {
                debug!(error = %fault, "body raised an unexpected error");
                TestResult::error(fault.to_string())
            }
        },
    }
}
