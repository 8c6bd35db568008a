//! Cause-chain unwrapping for raised test faults.

use std::iter;

use crate::domain::models::{DeliberateFailure, TestFault};

/// Iterate over a fault and each of its nested causes, outermost first.
///
/// The chain is finite: every step moves into a strictly smaller boxed value
/// and stops at the first fault without a cause.
pub fn causes(fault: &TestFault) -> impl Iterator<Item = &TestFault> {
    iter::successors(Some(fault), |current| current.cause())
}

/// Find the deliberate failure signal in a fault's cause chain, if any.
///
/// A deliberate failure has no further cause, so the first one found is also
/// the innermost.
pub fn find_deliberate_failure(fault: &TestFault) -> Option<&DeliberateFailure> {
    causes(fault).find_map(|link| match link {
        TestFault::Deliberate(failure) => Some(failure),
        TestFault::Unexpected { .. } => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_unexpected_examines_one_value() {
        let fault = TestFault::unexpected("boom");
        assert_eq!(causes(&fault).count(), 1);
        assert!(find_deliberate_failure(&fault).is_none());
    }

    #[test]
    fn test_deliberate_at_top() {
        let fault = TestFault::fail("The test has failed");
        let found = find_deliberate_failure(&fault).expect("deliberate failure");
        assert_eq!(found.message(), "The test has failed");
    }

    #[test]
    fn test_deliberate_nested_three_deep() {
        let fault = TestFault::wrap(
            "invocation failed",
            TestFault::wrap("target raised", TestFault::fail("expected 3 but was 4")),
        );

        assert_eq!(causes(&fault).count(), 3);
        let found = find_deliberate_failure(&fault).expect("nested deliberate failure");
        assert_eq!(found.message(), "expected 3 but was 4");
    }

    #[test]
    fn test_chain_without_deliberate_is_absent() {
        let fault = TestFault::wrap("outer", TestFault::unexpected("inner"));
        assert!(find_deliberate_failure(&fault).is_none());
    }
}
