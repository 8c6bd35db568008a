use std::fmt;
use std::sync::Arc;

use crate::domain::models::{ExecutionContext, TestFault, TestResult};

/// Identity of a single test method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestMethod {
    name: String,
}

impl TestMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What an inner command is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandTarget {
    /// Exactly one test method
    Method(TestMethod),
    /// A composite of several tests
    Suite { name: String, children: usize },
}

/// Port for the inner execution unit wrapped by the timeout governor.
///
/// `execute` runs the test body on a worker thread and either returns a
/// result or raises a [`TestFault`]. Panics are caught by the caller.
/// `tear_down` always runs after `execute`, whatever happened to the body.
pub trait TestCommand: Send + Sync + 'static {
    /// The test this command is bound to
    fn target(&self) -> CommandTarget;

    /// Run the test body.
    fn execute(&self, context: &ExecutionContext) -> Result<TestResult, TestFault>;

    /// Required cleanup after the body.
    fn tear_down(&self, _context: &ExecutionContext) -> Result<(), TestFault> {
        Ok(())
    }
}

type Body = dyn Fn(&ExecutionContext) -> Result<TestResult, TestFault> + Send + Sync;
type TearDown = dyn Fn(&ExecutionContext) -> Result<(), TestFault> + Send + Sync;

/// A [`TestCommand`] backed by closures, bound to one named test method.
///
/// # Examples
///
/// ```
/// use timebox::domain::models::TestResult;
/// use timebox::domain::ports::FnTestCommand;
///
/// let command = FnTestCommand::new("math.adds", |_ctx| {
///     assert_eq!(1 + 1, 2);
///     Ok(TestResult::passed())
/// });
/// # let _ = command;
/// ```
pub struct FnTestCommand {
    method: TestMethod,
    body: Box<Body>,
    tear_down: Option<Box<TearDown>>,
}

impl FnTestCommand {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&ExecutionContext) -> Result<TestResult, TestFault> + Send + Sync + 'static,
    {
        Self {
            method: TestMethod::new(name),
            body: Box::new(body),
            tear_down: None,
        }
    }

    /// Attach a teardown step
    #[must_use]
    pub fn with_tear_down<F>(mut self, tear_down: F) -> Self
    where
        F: Fn(&ExecutionContext) -> Result<(), TestFault> + Send + Sync + 'static,
    {
        self.tear_down = Some(Box::new(tear_down));
        self
    }

    pub fn into_arc(self) -> Arc<dyn TestCommand> {
        Arc::new(self)
    }
}

impl TestCommand for FnTestCommand {
    fn target(&self) -> CommandTarget {
        CommandTarget::Method(self.method.clone())
    }

    fn execute(&self, context: &ExecutionContext) -> Result<TestResult, TestFault> {
        (self.body)(context)
    }

    fn tear_down(&self, context: &ExecutionContext) -> Result<(), TestFault> {
        match &self.tear_down {
            Some(tear_down) => tear_down(context),
            None => Ok(()),
        }
    }
}
