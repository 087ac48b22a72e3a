//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Phase of a workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The question is split into sub-questions
    Decompose,
    /// Every sub-question is answered by the RAG backend
    Answer,
    /// The answers are recombined into the final response
    Synthesize,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Decompose => "decompose",
            Phase::Answer => "answer",
            Phase::Synthesize => "synthesize",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Decompose => "Decomposition",
            Phase::Answer => "Sub-question Answers",
            Phase::Synthesize => "Synthesis",
        }
    }

    /// 1-based position of the phase in a run
    pub fn number(&self) -> usize {
        match self {
            Phase::Decompose => 1,
            Phase::Answer => 2,
            Phase::Synthesize => 3,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert!(Phase::Decompose.number() < Phase::Answer.number());
        assert!(Phase::Answer.number() < Phase::Synthesize.number());
    }

    #[test]
    fn test_phase_serde() {
        assert_eq!(serde_json::to_string(&Phase::Answer).unwrap(), "\"answer\"");
    }
}
