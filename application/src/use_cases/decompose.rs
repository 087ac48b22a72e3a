//! Decompose use case
//!
//! Splits one question into ordered sub-questions with the text-generation
//! gateway.

use crate::config::WorkflowParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::shared::send_with_system_prompt;
use std::sync::Arc;
use subquery_domain::{PromptTemplate, Question, SubQuestion, parse_sub_questions};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during decomposition
#[derive(Error, Debug)]
pub enum DecomposeError {
    #[error("Decomposition failed: {0}")]
    Gateway(#[from] GatewayError),
}

/// Use case for decomposing a question into sub-questions
pub struct DecomposeUseCase<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    params: WorkflowParams,
}

impl<G: LlmGateway + ?Sized> DecomposeUseCase<G> {
    pub fn new(gateway: Arc<G>, params: WorkflowParams) -> Self {
        Self { gateway, params }
    }

    /// Decompose `question` into at least one sub-question.
    ///
    /// Gateway failures propagate to the caller without retry.
    pub async fn execute(&self, question: &Question) -> Result<Vec<SubQuestion>, DecomposeError> {
        let raw = send_with_system_prompt(
            self.gateway.as_ref(),
            &self.params.decomposer_model,
            PromptTemplate::decomposition_system(),
            &PromptTemplate::decomposition_query(question.content()),
            self.params.llm_timeout,
        )
        .await?;

        let sub_questions = parse_sub_questions(&raw, question);
        info!("Decomposed question into {} sub-questions", sub_questions.len());

        Ok(sub_questions)
    }
}
