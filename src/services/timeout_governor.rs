use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::domain::error::GovernorError;
use crate::domain::models::{ExecutionContext, GovernorConfig, TestResult, TimeoutSpec};
use crate::domain::ports::{CommandTarget, DebuggerProbe, TestCommand, TestMethod};
use crate::services::strategy::{Invocation, PlatformStrategy, TimeoutStrategy};

/// Bounds the wall-clock duration of a single test method invocation.
///
/// A governor is built for one test method and consumed by [`execute`],
/// so no state survives between invocations. The enforcement strategy is
/// fixed at compile time through `S`.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use timebox::domain::models::{ExecutionContext, TestResult};
/// use timebox::domain::ports::FnTestCommand;
/// use timebox::infrastructure::debugger::FixedDebuggerProbe;
/// use timebox::services::TimeoutGovernor;
///
/// # async fn example() -> anyhow::Result<()> {
/// let command = FnTestCommand::new("orders.ships_on_time", |_ctx| Ok(TestResult::passed()));
/// let governor: TimeoutGovernor = TimeoutGovernor::new(
///     command.into_arc(),
///     500,
///     Some(Arc::new(FixedDebuggerProbe::detached())),
/// )?;
///
/// let mut context = ExecutionContext::new("orders.ships_on_time");
/// let result = governor.execute(&mut context).await;
/// assert!(!result.is_failure());
/// # Ok(())
/// # }
/// ```
///
/// [`execute`]: TimeoutGovernor::execute
pub struct TimeoutGovernor<S: TimeoutStrategy = PlatformStrategy> {
    command: Arc<dyn TestCommand>,
    method: TestMethod,
    timeout: TimeoutSpec,
    debugger: Arc<dyn DebuggerProbe>,
    strategy: S,
}

impl<S: TimeoutStrategy> TimeoutGovernor<S> {
    /// Create a governor for one test method.
    ///
    /// Fails before anything runs when the timeout is not positive, the
    /// debugger probe is missing, or the command is bound to a suite.
    pub fn new(
        command: Arc<dyn TestCommand>,
        timeout_ms: i64,
        debugger: Option<Arc<dyn DebuggerProbe>>,
    ) -> Result<Self, GovernorError> {
        let timeout = TimeoutSpec::from_millis(timeout_ms)?;
        let debugger = debugger.ok_or(GovernorError::MissingDebuggerProbe)?;
        let method = match command.target() {
            CommandTarget::Method(method) => method,
            CommandTarget::Suite { name, children } => {
                return Err(GovernorError::NotATestMethod { name, children })
            }
        };

        Ok(Self {
            command,
            method,
            timeout,
            debugger,
            strategy: S::default(),
        })
    }

    /// Create a governor using the configured default timeout
    pub fn from_config(
        command: Arc<dyn TestCommand>,
        config: &GovernorConfig,
        debugger: Option<Arc<dyn DebuggerProbe>>,
    ) -> Result<Self, GovernorError> {
        Self::new(command, config.default_timeout_ms, debugger)
    }

    pub const fn timeout(&self) -> TimeoutSpec {
        self.timeout
    }

    pub const fn method(&self) -> &TestMethod {
        &self.method
    }

    /// Run the wrapped test and record its final result in `context`.
    ///
    /// The debugger probe is queried once. `CurrentResult` is written exactly
    /// once, after the strategy has decided.
    pub async fn execute(self, context: &mut ExecutionContext) -> TestResult {
        let span = info_span!(
            "timeout_governor",
            invocation_id = %Uuid::new_v4(),
            test = %self.method,
            timeout_ms = self.timeout.millis(),
            strategy = S::NAME,
        );

        let Self {
            command,
            timeout,
            debugger,
            strategy,
            ..
        } = self;

        let result = async {
            let debugger_attached = debugger.is_attached();
            let invocation = Invocation {
                command,
                context: context.fork_for_worker(),
                timeout,
                debugger_attached,
            };

            let result = strategy.run(invocation).await;
            debug!(debugger_attached, result = %result, "test invocation settled");
            result
        }
        .instrument(span)
        .await;

        context.set_current_result(result.clone());
        result
    }
}

impl<S: TimeoutStrategy> std::fmt::Debug for TimeoutGovernor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeoutGovernor")
            .field("method", &self.method)
            .field("timeout", &self.timeout)
            .field("strategy", &S::NAME)
            .finish_non_exhaustive()
    }
}
