use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::fault::TestFault;
use super::test_result::TestResult;

/// Best-effort request for a running test body to stop.
///
/// Cloning shares the underlying flag. Bodies must poll it to honour it.
#[derive(Debug, Clone, Default)]
pub struct InterruptSignal {
    requested: Arc<AtomicBool>,
}

impl InterruptSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

/// Per-invocation execution state handed to the governor.
///
/// Owns the single `CurrentResult` slot. Worker threads get their own view
/// through [`ExecutionContext::fork_for_worker`] and never write this slot.
#[derive(Debug)]
pub struct ExecutionContext {
    test_name: String,
    current_result: Option<TestResult>,
    interrupt: InterruptSignal,
}

impl ExecutionContext {
    pub fn new(test_name: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            current_result: None,
            interrupt: InterruptSignal::new(),
        }
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub const fn current_result(&self) -> Option<&TestResult> {
        self.current_result.as_ref()
    }

    pub fn set_current_result(&mut self, result: TestResult) {
        self.current_result = Some(result);
    }

    pub fn take_current_result(&mut self) -> Option<TestResult> {
        self.current_result.take()
    }

    pub const fn interrupt_signal(&self) -> &InterruptSignal {
        &self.interrupt
    }

    /// Whether the governor asked the running body to stop
    pub fn interrupt_requested(&self) -> bool {
        self.interrupt.is_requested()
    }

    /// Raise an interruption fault if one has been requested.
    ///
    /// Intended for long-running bodies: `context.check_interrupt()?;`
    pub fn check_interrupt(&self) -> Result<(), TestFault> {
        if self.interrupt_requested() {
            Err(TestFault::interrupted())
        } else {
            Ok(())
        }
    }

    /// Context for the worker running one invocation's body: same test,
    /// empty result slot and a fresh interrupt signal, so a request made
    /// during this invocation never reaches a later one.
    pub fn fork_for_worker(&self) -> Self {
        Self {
            test_name: self.test_name.clone(),
            current_result: None,
            interrupt: InterruptSignal::new(),
        }
    }
}
