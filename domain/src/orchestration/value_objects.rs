//! Orchestration value objects - immutable result types for a workflow run.
//!
//! - [`Answer`] - A sub-question's answer, or the "no response found" sentinel
//! - [`SubAnswerOutcome`] - Result of the retry loop for one sub-question
//! - [`QaPair`] - A sub-question paired with its answer
//! - [`WorkflowResult`] - Complete result of one run

use crate::core::question::SubQuestion;
use serde::{Deserialize, Serialize};

/// Text substituted for a sub-question that could not be answered
pub const NO_RESPONSE_FOUND: &str = "no response found";

/// Answer to one sub-question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Answer {
    /// The answering backend returned this text
    Found(String),
    /// Every attempt within the retry budget failed
    NoResponse,
}

impl Answer {
    pub fn found(text: impl Into<String>) -> Self {
        Answer::Found(text.into())
    }

    /// The answer text as it is shown to the synthesizer.
    ///
    /// The sentinel renders as [`NO_RESPONSE_FOUND`].
    pub fn as_str(&self) -> &str {
        match self {
            Answer::Found(text) => text,
            Answer::NoResponse => NO_RESPONSE_FOUND,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Answer::Found(_))
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the bounded retry loop for one sub-question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubAnswerOutcome {
    /// An attempt succeeded
    Answered {
        text: String,
        /// 1-based number of the attempt that succeeded
        attempt: u32,
        /// Failures of the earlier attempts, in order
        failures: Vec<String>,
    },
    /// The budget was spent without a successful attempt
    Exhausted {
        /// One entry per failed attempt, in order
        failures: Vec<String>,
    },
}

impl SubAnswerOutcome {
    pub fn failures(&self) -> &[String] {
        match self {
            SubAnswerOutcome::Answered { failures, .. } => failures,
            SubAnswerOutcome::Exhausted { failures } => failures,
        }
    }

    pub fn into_answer(self) -> Answer {
        match self {
            SubAnswerOutcome::Answered { text, .. } => Answer::Found(text),
            SubAnswerOutcome::Exhausted { .. } => Answer::NoResponse,
        }
    }
}

/// A sub-question paired with its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub sub_question: SubQuestion,
    pub answer: Answer,
}

impl QaPair {
    pub fn new(sub_question: SubQuestion, answer: Answer) -> Self {
        Self {
            sub_question,
            answer,
        }
    }
}

/// Complete result of one decomposition workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    /// The original question
    pub question: String,
    /// Sub-questions paired with their answers, in decomposition order
    pub pairs: Vec<QaPair>,
    /// The formatted context block handed to the synthesizer
    pub context: String,
    /// The synthesized final answer
    pub final_answer: String,
}

impl WorkflowResult {
    pub fn new(
        question: impl Into<String>,
        pairs: Vec<QaPair>,
        context: impl Into<String>,
        final_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            pairs,
            context: context.into(),
            final_answer: final_answer.into(),
        }
    }

    /// Number of sub-questions that ended with the sentinel answer
    pub fn unanswered_count(&self) -> usize {
        self.pairs.iter().filter(|p| !p.answer.is_found()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_text() {
        assert_eq!(Answer::NoResponse.as_str(), "no response found");
        assert_eq!(Answer::NoResponse.to_string(), NO_RESPONSE_FOUND);
        assert!(!Answer::NoResponse.is_found());
    }

    #[test]
    fn test_outcome_into_answer() {
        let answered = SubAnswerOutcome::Answered {
            text: "42".to_string(),
            attempt: 2,
            failures: vec!["timeout".to_string()],
        };
        assert_eq!(answered.failures().len(), 1);
        assert_eq!(answered.into_answer(), Answer::found("42"));

        let exhausted = SubAnswerOutcome::Exhausted {
            failures: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(exhausted.into_answer(), Answer::NoResponse);
    }

    #[test]
    fn test_answer_json_shape() {
        let json = serde_json::to_value(Answer::found("yes")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "found", "text": "yes"}));
        let json = serde_json::to_value(Answer::NoResponse).unwrap();
        assert_eq!(json, serde_json::json!({"status": "no_response"}));
    }

    #[test]
    fn test_unanswered_count() {
        let result = WorkflowResult::new(
            "q",
            vec![
                QaPair::new(SubQuestion::new("a"), Answer::found("x")),
                QaPair::new(SubQuestion::new("b"), Answer::NoResponse),
            ],
            "",
            "final",
        );
        assert_eq!(result.unanswered_count(), 1);
    }
}
