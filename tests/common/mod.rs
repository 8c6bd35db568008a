//! Common test utilities for integration tests
//!
//! Provides fixture commands and probes shared across the governor tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use timebox::domain::models::{ExecutionContext, TestFault, TestResult};
use timebox::domain::ports::{DebuggerProbe, FnTestCommand, TestCommand};
use timebox::infrastructure::debugger::FixedDebuggerProbe;

/// Message used by fixtures that fail on purpose
pub const FAILURE_MESSAGE: &str = "The test has failed";

/// Message used by fixtures that raise an unexpected error
pub const ERROR_MESSAGE: &str = "Unexpected fixture error";

/// How a fixture body ends after its sleep
#[derive(Debug, Clone, Copy)]
pub enum Ending {
    Pass,
    Fail,
    Raise,
    Panic,
}

/// Flags a fixture records so tests can observe what actually ran
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    pub ran_to_completion: Arc<AtomicBool>,
    pub torn_down: Arc<AtomicBool>,
    pub interrupted_at_tear_down: Arc<AtomicBool>,
    pub executions: Arc<AtomicUsize>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completed(&self) -> bool {
        self.ran_to_completion.load(Ordering::SeqCst)
    }

    pub fn torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    /// Whether an interruption had been requested by the time teardown ran
    pub fn interrupted(&self) -> bool {
        self.interrupted_at_tear_down.load(Ordering::SeqCst)
    }

    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

fn finish(ending: Ending) -> Result<TestResult, TestFault> {
    match ending {
        Ending::Pass => Ok(TestResult::passed()),
        Ending::Fail => Err(TestFault::fail(FAILURE_MESSAGE)),
        Ending::Raise => Err(TestFault::unexpected(ERROR_MESSAGE)),
        Ending::Panic => panic!("{}", ERROR_MESSAGE),
    }
}

/// A body that blocks for `sleep` without checking for interruption, then ends.
pub fn sleepy_command(
    name: &str,
    sleep: Duration,
    ending: Ending,
    tracker: &Tracker,
) -> Arc<dyn TestCommand> {
    let executions = Arc::clone(&tracker.executions);
    let completed = Arc::clone(&tracker.ran_to_completion);
    let torn_down = Arc::clone(&tracker.torn_down);
    let interrupted = Arc::clone(&tracker.interrupted_at_tear_down);

    FnTestCommand::new(name, move |_ctx| {
        executions.fetch_add(1, Ordering::SeqCst);
        if !sleep.is_zero() {
            thread::sleep(sleep);
        }
        completed.store(true, Ordering::SeqCst);
        finish(ending)
    })
    .with_tear_down(move |ctx: &ExecutionContext| {
        interrupted.store(ctx.interrupt_requested(), Ordering::SeqCst);
        torn_down.store(true, Ordering::SeqCst);
        Ok(())
    })
    .into_arc()
}

/// A body that works in 10ms slices for `total`, checking for interruption
/// between slices, then passes.
pub fn cooperative_command(name: &str, total: Duration, tracker: &Tracker) -> Arc<dyn TestCommand> {
    let executions = Arc::clone(&tracker.executions);
    let completed = Arc::clone(&tracker.ran_to_completion);
    let torn_down = Arc::clone(&tracker.torn_down);
    let interrupted = Arc::clone(&tracker.interrupted_at_tear_down);

    FnTestCommand::new(name, move |ctx: &ExecutionContext| {
        executions.fetch_add(1, Ordering::SeqCst);
        let slice = Duration::from_millis(10);
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            ctx.check_interrupt()?;
            thread::sleep(slice);
            elapsed += slice;
        }
        completed.store(true, Ordering::SeqCst);
        Ok(TestResult::passed())
    })
    .with_tear_down(move |ctx: &ExecutionContext| {
        interrupted.store(ctx.interrupt_requested(), Ordering::SeqCst);
        torn_down.store(true, Ordering::SeqCst);
        Ok(())
    })
    .into_arc()
}

pub fn probe(attached: bool) -> Option<Arc<dyn DebuggerProbe>> {
    Some(Arc::new(FixedDebuggerProbe::new(attached)))
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
