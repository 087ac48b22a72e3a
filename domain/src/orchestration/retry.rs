//! Retry policy for answering a single sub-question.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default number of attempts per sub-question
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Bounded retry budget (Value Object)
///
/// Every failed or timed-out attempt consumes one slot. When the budget is
/// spent the sub-question gets the sentinel answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Result<Self, DomainError> {
        if max_attempts == 0 {
            return Err(DomainError::InvalidRetryPolicy);
        }
        Ok(Self { max_attempts })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Iterate over the 1-based attempt numbers allowed by this policy
    pub fn attempts(&self) -> impl Iterator<Item = u32> {
        1..=self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_two_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 2);
        assert_eq!(policy.attempts().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert_eq!(RetryPolicy::new(0), Err(DomainError::InvalidRetryPolicy));
    }
}
