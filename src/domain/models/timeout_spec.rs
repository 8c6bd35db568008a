use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::domain::error::GovernorError;

/// A validated, strictly positive wall-clock timeout in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct TimeoutSpec {
    millis: u64,
}

impl TimeoutSpec {
    /// Validate a raw millisecond count.
    ///
    /// # Errors
    ///
    /// Returns [`GovernorError::InvalidTimeout`] when `millis <= 0`.
    pub fn from_millis(millis: i64) -> Result<Self, GovernorError> {
        u64::try_from(millis)
            .ok()
            .filter(|&ms| ms > 0)
            .map(|millis| Self { millis })
            .ok_or(GovernorError::InvalidTimeout(millis))
    }

    pub const fn millis(&self) -> u64 {
        self.millis
    }

    pub const fn as_duration(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl TryFrom<i64> for TimeoutSpec {
    type Error = GovernorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_millis(value)
    }
}

impl From<TimeoutSpec> for i64 {
    fn from(spec: TimeoutSpec) -> Self {
        Self::try_from(spec.millis).unwrap_or(Self::MAX)
    }
}

impl fmt::Display for TimeoutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.millis)
    }
}
