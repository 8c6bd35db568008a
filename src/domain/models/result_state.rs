use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse outcome of a test invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "Passed"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Where in the test lifecycle an outcome originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureSite {
    Setup,
    Test,
    TearDown,
    Parent,
    Child,
}

impl fmt::Display for FailureSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Setup => "SetUp",
            Self::Test => "Test",
            Self::TearDown => "TearDown",
            Self::Parent => "Parent",
            Self::Child => "Child",
        };
        f.write_str(name)
    }
}

/// Label used for unexpected errors raised by a test body.
pub const ERROR_LABEL: &str = "Error";

/// Immutable description of a test outcome.
///
/// Errors and failures share `TestStatus::Failed` and are told apart only by
/// their label. A new value always replaces the old one wholesale; there are
/// no setters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultState {
    status: TestStatus,
    label: String,
    site: FailureSite,
}

impl ResultState {
    /// Create a state originating in the test body
    pub fn new(status: TestStatus, label: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
            site: FailureSite::Test,
        }
    }

    /// The test passed.
    pub fn success() -> Self {
        Self::new(TestStatus::Passed, "")
    }

    /// The test failed deliberately (assertion failure).
    pub fn failure() -> Self {
        Self::new(TestStatus::Failed, "")
    }

    /// The test raised an unexpected error.
    pub fn error() -> Self {
        Self::new(TestStatus::Failed, ERROR_LABEL)
    }

    /// Return a copy of this state attributed to a different site
    #[must_use]
    pub fn with_site(&self, site: FailureSite) -> Self {
        Self {
            status: self.status,
            label: self.label.clone(),
            site,
        }
    }

    pub const fn status(&self) -> TestStatus {
        self.status
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub const fn site(&self) -> FailureSite {
        self.site
    }

    /// Whether this state is a conclusive failure (deliberate or error)
    pub fn is_failure(&self) -> bool {
        self.status == TestStatus::Failed
    }

    /// Whether this state is the "Error" flavour of failure
    pub fn is_error(&self) -> bool {
        self.is_failure() && self.label == ERROR_LABEL
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status)?;
        if !self.label.is_empty() {
            write!(f, ":{}", self.label)?;
        }
        if self.site != FailureSite::Test {
            write!(f, " ({})", self.site)?;
        }
        Ok(())
    }
}
