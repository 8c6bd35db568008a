use serde::{Deserialize, Serialize};
use std::fmt;

use super::result_state::{ResultState, TestStatus};

/// The value held in an execution context's `CurrentResult` slot.
///
/// Pairs the outcome state with the human-readable message that accompanied
/// it (assertion text, error text or the timeout text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    state: ResultState,
    message: Option<String>,
}

impl TestResult {
    pub fn new(state: ResultState, message: Option<String>) -> Self {
        Self { state, message }
    }

    /// A plain pass with no message
    pub fn passed() -> Self {
        Self::new(ResultState::success(), None)
    }

    /// An unexpected error with the given text
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ResultState::error(), Some(message.into()))
    }

    pub const fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn status(&self) -> TestStatus {
        self.state.status()
    }

    pub fn is_failure(&self) -> bool {
        self.state.is_failure()
    }
}

impl From<ResultState> for TestResult {
    fn from(state: ResultState) -> Self {
        Self::new(state, None)
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} - {}", self.state, message),
            None => write!(f, "{}", self.state),
        }
    }
}
