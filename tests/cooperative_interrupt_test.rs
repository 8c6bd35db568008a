//! Integration tests for the cooperative-interrupt timeout strategy.
//!
//! Unlike the deadline race, this strategy always waits for the body and its
//! teardown, so whether a slow body "ran to completion" depends on whether
//! it polls for interruption.

mod common;

use common::{
    cooperative_command, probe, setup_test_logging, sleepy_command, Ending, Tracker,
    ERROR_MESSAGE, FAILURE_MESSAGE,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use timebox::domain::models::{ExecutionContext, ResultState, TestResult, TestStatus};
use timebox::domain::ports::TestCommand;
use timebox::services::{CooperativeInterrupt, DeadlineRace, TimeoutGovernor};

const TIMEOUT_MS: i64 = 100;
const TIMEOUT_MESSAGE: &str = "Test exceeded Timeout value of 100ms";
const SLOW: Duration = Duration::from_millis(200);

async fn execute(command: Arc<dyn TestCommand>, attached: bool) -> (TestResult, ExecutionContext) {
    setup_test_logging();
    let governor = TimeoutGovernor::<CooperativeInterrupt>::new(command, TIMEOUT_MS, probe(attached))
        .expect("valid governor");

    let mut context = ExecutionContext::new("fixture.case");
    let result = governor.execute(&mut context).await;
    (result, context)
}

#[tokio::test]
async fn test_slow_pass_without_debugger_times_out() {
    let tracker = Tracker::new();
    let command = sleepy_command("fixture.case", SLOW, Ending::Pass, &tracker);
    let (result, context) = execute(command, false).await;

    assert_eq!(result.status(), TestStatus::Failed);
    assert_eq!(result.state().label(), TIMEOUT_MESSAGE);
    assert_eq!(result.message(), Some(TIMEOUT_MESSAGE));
    // The body never polled for interruption, so it finished anyway.
    assert!(tracker.completed());
    assert!(tracker.torn_down());
    assert!(tracker.interrupted());
    assert_eq!(context.current_result(), Some(&result));
}

#[tokio::test]
async fn test_polling_body_is_interrupted_without_debugger() {
    let tracker = Tracker::new();
    let command = cooperative_command("fixture.case", Duration::from_secs(3), &tracker);

    let started = Instant::now();
    let (result, _) = execute(command, false).await;

    assert_eq!(result.state().label(), TIMEOUT_MESSAGE);
    assert!(!tracker.completed(), "interrupted body should stop early");
    assert!(tracker.torn_down(), "teardown must run after interruption");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_slow_failure_without_debugger_reports_timeout() {
    let tracker = Tracker::new();
    let command = sleepy_command("fixture.case", SLOW, Ending::Fail, &tracker);
    let (result, _) = execute(command, false).await;

    assert_eq!(result.state().label(), TIMEOUT_MESSAGE);
}

#[tokio::test]
async fn test_debugger_suppresses_interruption() {
    let tracker = Tracker::new();
    let command = cooperative_command("fixture.case", Duration::from_millis(300), &tracker);
    let (result, _) = execute(command, true).await;

    assert!(tracker.completed(), "body must not be interrupted under a debugger");
    assert!(!tracker.interrupted());
    // A pass that overran is still a timeout.
    assert_eq!(result.state().label(), TIMEOUT_MESSAGE);
}

#[tokio::test]
async fn test_slow_deliberate_failure_with_debugger_is_preserved() {
    let tracker = Tracker::new();
    let command = sleepy_command("fixture.case", SLOW, Ending::Fail, &tracker);
    let (result, _) = execute(command, true).await;

    assert_eq!(result.state(), &ResultState::failure());
    assert_eq!(result.message(), Some(FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_slow_unexpected_error_with_debugger_is_preserved() {
    let tracker = Tracker::new();
    let command = sleepy_command("fixture.case", SLOW, Ending::Raise, &tracker);
    let (result, _) = execute(command, true).await;

    assert_eq!(result.state().label(), "Error");
    assert_eq!(result.message(), Some(ERROR_MESSAGE));
}

#[tokio::test]
async fn test_immediate_outcomes_ignore_debugger() {
    for ending in [Ending::Pass, Ending::Fail, Ending::Raise, Ending::Panic] {
        let detached = execute(
            sleepy_command("fixture.case", Duration::ZERO, ending, &Tracker::new()),
            false,
        )
        .await
        .0;
        let attached = execute(
            sleepy_command("fixture.case", Duration::ZERO, ending, &Tracker::new()),
            true,
        )
        .await
        .0;
        assert_eq!(detached, attached, "outcome for {ending:?} depends on debugger");
    }
}

#[tokio::test]
async fn test_interruption_does_not_carry_over_to_next_invocation() {
    setup_test_logging();
    let mut context = ExecutionContext::new("fixture.case");

    let first = Tracker::new();
    let governor = TimeoutGovernor::<CooperativeInterrupt>::new(
        sleepy_command("fixture.case", SLOW, Ending::Pass, &first),
        TIMEOUT_MS,
        probe(false),
    )
    .expect("valid governor");
    let result = governor.execute(&mut context).await;
    assert_eq!(result.state().label(), TIMEOUT_MESSAGE);
    assert!(first.interrupted());
    assert!(!context.interrupt_requested());

    let second = Tracker::new();
    let governor = TimeoutGovernor::<CooperativeInterrupt>::new(
        cooperative_command("fixture.case", Duration::from_millis(30), &second),
        5_000,
        probe(false),
    )
    .expect("valid governor");
    assert_eq!(governor.execute(&mut context).await, TestResult::passed());
    assert!(second.completed());
    assert!(!second.interrupted());

    let third = Tracker::new();
    let governor = TimeoutGovernor::<DeadlineRace>::new(
        cooperative_command("fixture.case", Duration::from_millis(30), &third),
        5_000,
        probe(false),
    )
    .expect("valid governor");
    assert_eq!(governor.execute(&mut context).await, TestResult::passed());
    assert!(third.completed());
    assert_eq!(context.current_result(), Some(&TestResult::passed()));
}
