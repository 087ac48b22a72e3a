//! Answer-all use case
//!
//! Fans the sub-questions out to the answer port, one bounded retry loop per
//! sub-question, and fans the results back in, in input order.

use crate::config::WorkflowParams;
use crate::ports::answerer::{AnswerError, AnswerPort};
use crate::ports::event_logger::{NoWorkflowLogger, WorkflowEvent, WorkflowEventLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use std::sync::Arc;
use std::time::Duration;
use subquery_domain::{Answer, Phase, RetryPolicy, SubAnswerOutcome, SubQuestion};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Failure recorded for a sub-question whose answer task panicked
const TASK_PANICKED: &str = "answer task panicked";

/// Use case for answering every sub-question
///
/// Never fails as a whole: a sub-question whose attempts are all spent gets
/// [`Answer::NoResponse`] and the other sub-questions carry on.
pub struct AnswerAllUseCase<A: AnswerPort + ?Sized + 'static> {
    answerer: Arc<A>,
    params: WorkflowParams,
    logger: Arc<dyn WorkflowEventLogger>,
}

impl<A: AnswerPort + ?Sized + 'static> AnswerAllUseCase<A> {
    pub fn new(answerer: Arc<A>, params: WorkflowParams) -> Self {
        Self {
            answerer,
            params,
            logger: Arc::new(NoWorkflowLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn WorkflowEventLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Answer every sub-question with default (no-op) progress
    pub async fn execute(&self, sub_questions: &[SubQuestion]) -> Vec<Answer> {
        self.execute_with_progress(sub_questions, &NoProgress).await
    }

    /// Answer every sub-question, returning one answer per sub-question in
    /// the same order
    pub async fn execute_with_progress(
        &self,
        sub_questions: &[SubQuestion],
        progress: &dyn ProgressNotifier,
    ) -> Vec<Answer> {
        self.outcomes_with_progress(sub_questions, progress)
            .await
            .into_iter()
            .map(SubAnswerOutcome::into_answer)
            .collect()
    }

    /// Run the retry loops and return the typed outcome of each one
    pub async fn outcomes_with_progress(
        &self,
        sub_questions: &[SubQuestion],
        progress: &dyn ProgressNotifier,
    ) -> Vec<SubAnswerOutcome> {
        info!(
            "Answering {} sub-questions (concurrency {})",
            sub_questions.len(),
            self.params.max_concurrency
        );
        progress.on_phase_start(&Phase::Answer, sub_questions.len());

        let outcomes = if self.params.max_concurrency <= 1 {
            self.answer_sequential(sub_questions, progress).await
        } else {
            self.answer_concurrent(sub_questions, progress).await
        };

        progress.on_phase_complete(&Phase::Answer);
        outcomes
    }

    async fn answer_sequential(
        &self,
        sub_questions: &[SubQuestion],
        progress: &dyn ProgressNotifier,
    ) -> Vec<SubAnswerOutcome> {
        let mut outcomes = Vec::with_capacity(sub_questions.len());

        // One task per sub-question so a panicking answerer stays contained
        for (index, sub_question) in sub_questions.iter().enumerate() {
            let task = tokio::spawn(Self::answer_one(
                Arc::clone(&self.answerer),
                Arc::clone(&self.logger),
                index,
                sub_question.content().to_string(),
                self.params.retry,
                self.params.attempt_timeout,
            ));
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Task join error: {}", e);
                    self.exhausted_by_panic(index, sub_question)
                }
            };
            Self::report(progress, index, sub_question, &outcome);
            outcomes.push(outcome);
        }

        outcomes
    }

    async fn answer_concurrent(
        &self,
        sub_questions: &[SubQuestion],
        progress: &dyn ProgressNotifier,
    ) -> Vec<SubAnswerOutcome> {
        let semaphore = Arc::new(Semaphore::new(self.params.max_concurrency));
        let mut join_set = JoinSet::new();

        for (index, sub_question) in sub_questions.iter().enumerate() {
            let answerer = Arc::clone(&self.answerer);
            let logger = Arc::clone(&self.logger);
            let semaphore = Arc::clone(&semaphore);
            let content = sub_question.content().to_string();
            let retry = self.params.retry;
            let timeout = self.params.attempt_timeout;

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let outcome =
                    Self::answer_one(answerer, logger, index, content, retry, timeout).await;
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<SubAnswerOutcome>> = vec![None; sub_questions.len()];

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, outcome)) => {
                    Self::report(progress, index, &sub_questions[index], &outcome);
                    slots[index] = Some(outcome);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A slot is only empty when its task panicked
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(outcome) => outcome,
                None => {
                    let outcome = self.exhausted_by_panic(index, &sub_questions[index]);
                    Self::report(progress, index, &sub_questions[index], &outcome);
                    outcome
                }
            })
            .collect()
    }

    fn exhausted_by_panic(&self, index: usize, sub_question: &SubQuestion) -> SubAnswerOutcome {
        let failures = vec![TASK_PANICKED.to_string()];
        warn!(
            "Sub-question {} answer task panicked, using sentinel answer",
            index + 1
        );
        self.logger.log(WorkflowEvent::new(
            "sub_question_exhausted",
            serde_json::json!({
                "index": index,
                "sub_question": sub_question.content(),
                "failures": failures,
            }),
        ));
        SubAnswerOutcome::Exhausted { failures }
    }

    /// Bounded retry loop for one sub-question
    async fn answer_one(
        answerer: Arc<A>,
        logger: Arc<dyn WorkflowEventLogger>,
        index: usize,
        sub_question: String,
        retry: RetryPolicy,
        timeout: Option<Duration>,
    ) -> SubAnswerOutcome {
        let mut failures = Vec::new();

        for attempt in retry.attempts() {
            debug!(index, attempt, "Answering sub-question");

            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, answerer.answer(&sub_question))
                    .await
                    .unwrap_or(Err(AnswerError::Timeout)),
                None => answerer.answer(&sub_question).await,
            };

            match result {
                Ok(text) => {
                    logger.log(WorkflowEvent::new(
                        "sub_question_answered",
                        serde_json::json!({
                            "index": index,
                            "sub_question": sub_question,
                            "attempt": attempt,
                            "answer_len": text.len(),
                        }),
                    ));
                    return SubAnswerOutcome::Answered {
                        text,
                        attempt,
                        failures,
                    };
                }
                Err(e) => {
                    warn!(
                        "Sub-question {} attempt {}/{} failed: {}",
                        index + 1,
                        attempt,
                        retry.max_attempts(),
                        e
                    );
                    logger.log(WorkflowEvent::new(
                        "attempt_failed",
                        serde_json::json!({
                            "index": index,
                            "sub_question": sub_question,
                            "attempt": attempt,
                            "error": e.to_string(),
                        }),
                    ));
                    failures.push(e.to_string());
                }
            }
        }

        warn!(
            "Sub-question {} exhausted {} attempts, using sentinel answer",
            index + 1,
            retry.max_attempts()
        );
        logger.log(WorkflowEvent::new(
            "sub_question_exhausted",
            serde_json::json!({
                "index": index,
                "sub_question": sub_question,
                "failures": failures,
            }),
        ));

        SubAnswerOutcome::Exhausted { failures }
    }

    fn report(
        progress: &dyn ProgressNotifier,
        index: usize,
        sub_question: &SubQuestion,
        outcome: &SubAnswerOutcome,
    ) {
        let attempts = outcome.failures().len();
        for (i, failure) in outcome.failures().iter().enumerate() {
            progress.on_attempt_failed(index, i as u32 + 1, failure);
        }
        let success = matches!(outcome, SubAnswerOutcome::Answered { .. });
        debug!(index, attempts, success, "Sub-question finished");
        progress.on_task_complete(&Phase::Answer, sub_question.content(), success);
    }
}
