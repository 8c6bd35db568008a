use thiserror::Error;

/// Contract violations detected while constructing a timeout governor.
///
/// These are programmer errors, raised before any test code runs. They are
/// never turned into test outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernorError {
    #[error("Invalid timeout: {0}ms. Must be greater than zero")]
    InvalidTimeout(i64),

    #[error("A debugger probe is required to construct a timeout governor")]
    MissingDebuggerProbe,

    #[error("Timeout can only wrap a single test method, got suite '{name}' with {children} child test(s)")]
    NotATestMethod { name: String, children: usize },
}

impl GovernorError {
    /// All governor construction errors are invalid-argument errors.
    pub const fn is_invalid_argument(&self) -> bool {
        true
    }
}
