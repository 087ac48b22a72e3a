//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid retry policy: max_attempts must be at least 1")]
    InvalidRetryPolicy,

    #[error("Sub-question/answer count mismatch: {sub_questions} sub-questions, {answers} answers")]
    LengthMismatch { sub_questions: usize, answers: usize },
}
