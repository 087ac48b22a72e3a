//! Synthesize use case
//!
//! Pairs sub-questions with their answers, formats the context block and asks
//! the text-generation gateway for the final answer.

use crate::config::WorkflowParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::use_cases::shared::send_with_system_prompt;
use std::sync::Arc;
use subquery_domain::{
    Answer, DomainError, PromptTemplate, QaPair, Question, SubQuestion, format_qa_pairs,
    pair_answers,
};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during synthesis
#[derive(Error, Debug)]
pub enum SynthesizeError {
    #[error(transparent)]
    LengthMismatch(#[from] DomainError),

    #[error("Synthesis failed: {0}")]
    Gateway(#[from] GatewayError),
}

/// Output of the synthesis step
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub pairs: Vec<QaPair>,
    /// Formatted context block given to the synthesizer
    pub context: String,
    pub final_answer: String,
}

/// Use case for recombining answers into the final response
pub struct SynthesizeUseCase<G: LlmGateway + ?Sized> {
    gateway: Arc<G>,
    params: WorkflowParams,
}

impl<G: LlmGateway + ?Sized> SynthesizeUseCase<G> {
    pub fn new(gateway: Arc<G>, params: WorkflowParams) -> Self {
        Self { gateway, params }
    }

    /// Synthesize the final answer.
    ///
    /// `sub_questions` and `answers` must have the same length; a mismatch
    /// fails before the gateway is called. Sentinel answers are passed through.
    pub async fn execute(
        &self,
        sub_questions: &[SubQuestion],
        answers: &[Answer],
        question: &Question,
    ) -> Result<SynthesisOutput, SynthesizeError> {
        let pairs = pair_answers(sub_questions, answers)?;
        let context = format_qa_pairs(&pairs);

        info!("Synthesizing final answer from {} QA pairs", pairs.len());

        let final_answer = send_with_system_prompt(
            self.gateway.as_ref(),
            &self.params.synthesizer_model,
            PromptTemplate::synthesis_system(),
            &PromptTemplate::synthesis_prompt(&context, question.content()),
            self.params.llm_timeout,
        )
        .await?;

        Ok(SynthesisOutput {
            pairs,
            context,
            final_answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::ScriptedGateway;

    fn use_case(
        gateway: ScriptedGateway,
    ) -> (Arc<ScriptedGateway>, SynthesizeUseCase<ScriptedGateway>) {
        let gateway = Arc::new(gateway);
        let params = WorkflowParams::default().with_synthesizer_model("big-model".into());
        (Arc::clone(&gateway), SynthesizeUseCase::new(gateway, params))
    }

    #[tokio::test]
    async fn test_synthesis_prompt_contains_context_and_question() {
        let (gateway, use_case) = use_case(ScriptedGateway::replying(&["Both banks grew."]));
        let question = Question::new("How did Bank A and Bank B do?");

        let output = use_case
            .execute(
                &[SubQuestion::new("Bank A?"), SubQuestion::new("Bank B?")],
                &[Answer::found("grew"), Answer::NoResponse],
                &question,
            )
            .await
            .unwrap();

        assert_eq!(output.final_answer, "Both banks grew.");
        assert_eq!(
            output.context,
            "Question 1: Bank A?\nAnswer 1: grew\n\nQuestion 2: Bank B?\nAnswer 2: no response found"
        );

        let prompts = gateway.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].model, "big-model");
        assert!(prompts[0].prompt.contains(&output.context));
        assert!(prompts[0].prompt.contains(question.content()));
    }

    #[tokio::test]
    async fn test_length_mismatch_fails_fast() {
        let (gateway, use_case) = use_case(ScriptedGateway::replying(&["unused"]));

        let err = use_case
            .execute(
                &[SubQuestion::new("a"), SubQuestion::new("b")],
                &[Answer::found("only one")],
                &Question::new("q"),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SynthesizeError::LengthMismatch(DomainError::LengthMismatch { .. })
        ));
        assert!(gateway.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_same_inputs_same_context() {
        let (_, use_case) = use_case(ScriptedGateway::replying(&["x", "x"]));
        let sub_questions = [SubQuestion::new("a")];
        let answers = [Answer::found("1")];
        let question = Question::new("q");

        let first = use_case.execute(&sub_questions, &answers, &question).await.unwrap();
        let second = use_case.execute(&sub_questions, &answers, &question).await.unwrap();

        assert_eq!(first.context, second.context);
        assert_eq!(first.final_answer, second.final_answer);
    }

    #[tokio::test]
    async fn test_gateway_failure_propagates() {
        let (_, use_case) = use_case(ScriptedGateway::new(vec![Err(GatewayError::Timeout)]));

        let err = use_case
            .execute(&[SubQuestion::new("a")], &[Answer::NoResponse], &Question::new("q"))
            .await
            .unwrap_err();

        assert!(matches!(err, SynthesizeError::Gateway(GatewayError::Timeout)));
    }
}
