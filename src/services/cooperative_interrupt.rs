use async_trait::async_trait;
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::models::{TestResult, TimeoutSpec};
use crate::services::body_runner::{classify, from_join, run_to_completion};
use crate::services::strategy::{Invocation, TimeoutStrategy};

/// Arms a one-shot timer that asks the body to stop when it fires.
///
/// Interruption is best-effort: the body only stops if it polls
/// [`crate::domain::models::ExecutionContext::interrupt_requested`]. The body
/// and its teardown always run to completion before the timer is disarmed and
/// the result decided.
#[derive(Debug, Clone, Copy, Default)]
pub struct CooperativeInterrupt;

impl CooperativeInterrupt {
    fn settle(
        natural: TestResult,
        timed_out: bool,
        debugger_attached: bool,
        timeout: TimeoutSpec,
    ) -> TestResult {
        if timed_out && (!debugger_attached || !natural.is_failure()) {
            Self::timeout_result(timeout)
        } else {
            natural
        }
    }
}

#[async_trait]
impl TimeoutStrategy for CooperativeInterrupt {
    const NAME: &'static str = "cooperative-interrupt";
    const TIMEOUT_TEMPLATE: &'static str = "Test exceeded Timeout value of {timeout}ms";

    async fn run(&self, invocation: Invocation) -> TestResult {
        let Invocation {
            command,
            context,
            timeout,
            debugger_attached,
        } = invocation;

        // Written at most once, by the timer.
        let fired_at: Arc<OnceLock<Instant>> = Arc::default();
        let interrupt = context.interrupt_signal().clone();

        let timer = {
            let fired_at = Arc::clone(&fired_at);
            tokio::spawn(async move {
                tokio::time::sleep(timeout.as_duration()).await;
                let _ = fired_at.set(Instant::now());
                if debugger_attached {
                    info!(
                        timeout_ms = timeout.millis(),
                        "deadline elapsed with a debugger attached; not interrupting"
                    );
                } else {
                    warn!(
                        timeout_ms = timeout.millis(),
                        "deadline elapsed; requesting interruption of the test body"
                    );
                    interrupt.request();
                }
            })
        };

        let joined =
            tokio::task::spawn_blocking(move || run_to_completion(command.as_ref(), &context))
                .await;
        timer.abort();

        let natural = classify(from_join(joined));
        let timed_out = fired_at.get().is_some();
        debug!(timed_out, natural = %natural, "test body and teardown finished");

        Self::settle(natural, timed_out, debugger_attached, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ResultState;

    fn timeout() -> TimeoutSpec {
        TimeoutSpec::from_millis(100).expect("valid timeout")
    }

    fn failure() -> TestResult {
        TestResult::new(ResultState::failure(), Some("The test has failed".into()))
    }

    #[test]
    fn test_timeout_message_format() {
        let result = CooperativeInterrupt::timeout_result(timeout());
        assert_eq!(result.state().label(), "Test exceeded Timeout value of 100ms");
    }

    #[test]
    fn test_no_timeout_keeps_natural() {
        assert_eq!(
            CooperativeInterrupt::settle(failure(), false, false, timeout()),
            failure()
        );
    }

    #[test]
    fn test_timeout_without_debugger_overrides_failure() {
        let result = CooperativeInterrupt::settle(failure(), true, false, timeout());
        assert_eq!(result, CooperativeInterrupt::timeout_result(timeout()));
    }

    #[test]
    fn test_timeout_with_debugger_keeps_failure() {
        assert_eq!(
            CooperativeInterrupt::settle(failure(), true, true, timeout()),
            failure()
        );
    }

    #[test]
    fn test_timeout_with_debugger_overrides_pass() {
        let result = CooperativeInterrupt::settle(TestResult::passed(), true, true, timeout());
        assert_eq!(result, CooperativeInterrupt::timeout_result(timeout()));
    }
}
