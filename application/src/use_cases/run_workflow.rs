//! Run Workflow use case
//!
//! Orchestrates the full flow for one question:
//!
//! 1. Decompose: the question becomes ordered sub-questions
//! 2. Answer: each sub-question is answered with bounded retry
//! 3. Synthesize: the QA pairs are recombined into the final answer

use crate::config::WorkflowParams;
use crate::ports::answerer::AnswerPort;
use crate::ports::event_logger::{NoWorkflowLogger, WorkflowEvent, WorkflowEventLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::answer_all::AnswerAllUseCase;
use crate::use_cases::decompose::{DecomposeError, DecomposeUseCase};
use crate::use_cases::synthesize::{SynthesizeError, SynthesizeUseCase};
use std::sync::Arc;
use subquery_domain::{Phase, Question, WorkflowResult};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during a workflow run
///
/// Sub-question failures never appear here; they are recovered into the
/// sentinel answer.
#[derive(Error, Debug)]
pub enum RunWorkflowError {
    #[error(transparent)]
    Decompose(#[from] DecomposeError),

    #[error(transparent)]
    Synthesize(#[from] SynthesizeError),
}

/// Use case for running the decomposition workflow
pub struct RunWorkflowUseCase<G, A>
where
    G: LlmGateway + ?Sized,
    A: AnswerPort + ?Sized + 'static,
{
    decompose: DecomposeUseCase<G>,
    answer_all: AnswerAllUseCase<A>,
    synthesize: SynthesizeUseCase<G>,
    params: WorkflowParams,
    logger: Arc<dyn WorkflowEventLogger>,
}

impl<G, A> RunWorkflowUseCase<G, A>
where
    G: LlmGateway + ?Sized,
    A: AnswerPort + ?Sized + 'static,
{
    pub fn new(gateway: Arc<G>, answerer: Arc<A>, params: WorkflowParams) -> Self {
        Self {
            decompose: DecomposeUseCase::new(Arc::clone(&gateway), params.clone()),
            answer_all: AnswerAllUseCase::new(answerer, params.clone()),
            synthesize: SynthesizeUseCase::new(gateway, params.clone()),
            params,
            logger: Arc::new(NoWorkflowLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn WorkflowEventLogger>) -> Self {
        self.answer_all = self.answer_all.with_logger(Arc::clone(&logger));
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, question: &Question) -> Result<WorkflowResult, RunWorkflowError> {
        self.execute_with_progress(question, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn ProgressNotifier,
    ) -> Result<WorkflowResult, RunWorkflowError> {
        info!("Starting workflow for question: {}", question);

        // Phase 1: Decompose
        progress.on_phase_start(&Phase::Decompose, 1);
        let sub_questions = match self.decompose.execute(question).await {
            Ok(sub_questions) => sub_questions,
            Err(e) => {
                progress.on_task_complete(
                    &Phase::Decompose,
                    self.params.decomposer_model.as_str(),
                    false,
                );
                progress.on_phase_complete(&Phase::Decompose);
                return Err(e.into());
            }
        };
        progress.on_task_complete(
            &Phase::Decompose,
            self.params.decomposer_model.as_str(),
            true,
        );
        progress.on_phase_complete(&Phase::Decompose);

        self.logger.log(WorkflowEvent::new(
            "decomposed",
            serde_json::json!({
                "question": question.content(),
                "sub_questions": &sub_questions,
            }),
        ));

        // Phase 2: Answer
        let answers = self
            .answer_all
            .execute_with_progress(&sub_questions, progress)
            .await;

        // Phase 3: Synthesize
        progress.on_phase_start(&Phase::Synthesize, 1);
        let synthesis = self
            .synthesize
            .execute(&sub_questions, &answers, question)
            .await;
        progress.on_task_complete(
            &Phase::Synthesize,
            self.params.synthesizer_model.as_str(),
            synthesis.is_ok(),
        );
        progress.on_phase_complete(&Phase::Synthesize);
        let synthesis = synthesis?;

        let result = WorkflowResult::new(
            question.content(),
            synthesis.pairs,
            synthesis.context,
            synthesis.final_answer,
        );

        self.logger.log(WorkflowEvent::new(
            "synthesized",
            serde_json::json!({
                "question": question.content(),
                "sub_questions": result.pairs.len(),
                "unanswered": result.unanswered_count(),
                "final_answer": &result.final_answer,
            }),
        ));

        info!(
            "Workflow complete: {} sub-questions, {} unanswered",
            result.pairs.len(),
            result.unanswered_count()
        );

        Ok(result)
    }
}
