//! Domain layer for subquery
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! One [`Question`] is decomposed into ordered [`SubQuestion`]s. Each
//! sub-question is answered independently under a bounded [`RetryPolicy`],
//! yielding an [`Answer`] (possibly the "no response found" sentinel). The
//! pairs are formatted into a context block and synthesized into the final
//! answer of a [`WorkflowResult`].
//!
//! ```text
//! Question ──decompose──▶ [SubQuestion; N] ──answer──▶ [Answer; N]
//!                                                         │
//!            WorkflowResult ◀──synthesize── [QaPair; N] ◀─┘
//! ```

pub mod core;
pub mod decomposition;
pub mod orchestration;
pub mod prompt;

// Re-export commonly used types
pub use crate::core::{
    error::DomainError,
    model::Model,
    question::{Question, SubQuestion},
};
pub use crate::decomposition::parse_sub_questions;
pub use crate::orchestration::{
    context::{format_qa_pairs, pair_answers},
    entities::Phase,
    retry::RetryPolicy,
    value_objects::{Answer, NO_RESPONSE_FOUND, QaPair, SubAnswerOutcome, WorkflowResult},
};
pub use crate::prompt::PromptTemplate;
