//! Values a test body can raise.
//!
//! Every raised value is either a [`DeliberateFailure`] produced by the
//! assertion layer or an unexpected error, which may wrap a further cause.

use std::any::Any;
use thiserror::Error;

use super::result_state::ResultState;

/// Signal raised by the assertion layer meaning "this test fails now".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DeliberateFailure {
    state: ResultState,
    message: String,
}

impl DeliberateFailure {
    pub fn new(state: ResultState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }

    /// A plain assertion failure with the given message
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(ResultState::failure(), message)
    }

    pub const fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Anything a test body raised instead of returning a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestFault {
    #[error(transparent)]
    Deliberate(DeliberateFailure),

    #[error("{message}")]
    Unexpected {
        message: String,
        #[source]
        cause: Option<Box<TestFault>>,
    },
}

/// Message raised by [`crate::domain::models::ExecutionContext::check_interrupt`].
pub const INTERRUPTED_MESSAGE: &str = "Test interrupted";

impl TestFault {
    /// Fail the test on purpose with the given message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Deliberate(DeliberateFailure::failure(message))
    }

    /// An unclassified error with no nested cause.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
            cause: None,
        }
    }

    /// An unclassified error wrapping an underlying cause.
    pub fn wrap(message: impl Into<String>, cause: Self) -> Self {
        Self::Unexpected {
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    pub fn interrupted() -> Self {
        Self::unexpected(INTERRUPTED_MESSAGE)
    }

    /// The nested cause, if this is a wrapping error
    pub fn cause(&self) -> Option<&Self> {
        match self {
            Self::Deliberate(_) => None,
            Self::Unexpected { cause, .. } => cause.as_deref(),
        }
    }

    /// Classify a panic payload caught from a test body.
    ///
    /// A [`DeliberateFailure`] raised with `std::panic::panic_any` stays
    /// deliberate; string payloads become unexpected errors.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<DeliberateFailure>() {
            Ok(failure) => return Self::Deliberate(*failure),
            Err(other) => other,
        };
        let payload = match payload.downcast::<Self>() {
            Ok(fault) => return *fault,
            Err(other) => other,
        };
        if let Some(message) = payload.downcast_ref::<&str>() {
            Self::unexpected(*message)
        } else if let Some(message) = payload.downcast_ref::<String>() {
            Self::unexpected(message.clone())
        } else {
            Self::unexpected("test body panicked")
        }
    }
}

impl From<DeliberateFailure> for TestFault {
    fn from(failure: DeliberateFailure) -> Self {
        Self::Deliberate(failure)
    }
}

impl From<anyhow::Error> for TestFault {
    fn from(err: anyhow::Error) -> Self {
        // `downcast_ref` on the anyhow error would also match a context's
        // inner error, so only the outermost link is checked here.
        if let Some(failure) = err
            .chain()
            .next()
            .and_then(|outer| outer.downcast_ref::<DeliberateFailure>())
        {
            return Self::Deliberate(failure.clone());
        }

        let nested = err
            .chain()
            .skip(1)
            .find_map(|cause| cause.downcast_ref::<DeliberateFailure>())
            .cloned()
            .map(|failure| Box::new(Self::Deliberate(failure)));

        Self::Unexpected {
            message: err.to_string(),
            cause: nested,
        }
    }
}
