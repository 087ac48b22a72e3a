//! Workflow parameters for use case control.
//!
//! [`WorkflowParams`] groups the static parameters that control one
//! decomposition workflow run: which models decompose and synthesize, the
//! per-sub-question retry budget, timeouts and the fan-out concurrency limit.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use subquery_domain::{Model, RetryPolicy};

/// Default number of sub-questions answered at the same time
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Default bound for a single answer attempt
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default bound for a single decomposition or synthesis call
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);

/// Workflow control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowParams {
    /// Model that splits the question into sub-questions.
    pub decomposer_model: Model,
    /// Model that writes the final answer.
    pub synthesizer_model: Model,
    /// Attempts allowed per sub-question.
    pub retry: RetryPolicy,
    /// Timeout for each answer attempt; an elapsed timeout counts as a failed attempt.
    pub attempt_timeout: Option<Duration>,
    /// Timeout for each decomposition and synthesis call.
    pub llm_timeout: Option<Duration>,
    /// Maximum number of sub-questions answered concurrently (1 = sequential).
    pub max_concurrency: usize,
}

impl Default for WorkflowParams {
    fn default() -> Self {
        Self {
            decomposer_model: Model::default(),
            synthesizer_model: Model::default(),
            retry: RetryPolicy::default(),
            attempt_timeout: Some(DEFAULT_ATTEMPT_TIMEOUT),
            llm_timeout: Some(DEFAULT_LLM_TIMEOUT),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl WorkflowParams {
    // ==================== Builder Methods ====================

    pub fn with_decomposer_model(mut self, model: Model) -> Self {
        self.decomposer_model = model;
        self
    }

    pub fn with_synthesizer_model(mut self, model: Model) -> Self {
        self.synthesizer_model = model;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn with_llm_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.llm_timeout = timeout;
        self
    }

    /// Set the fan-out concurrency limit (values below 1 are raised to 1)
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    /// Answer sub-questions one at a time
    pub fn sequential(self) -> Self {
        self.with_max_concurrency(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = WorkflowParams::default();
        assert_eq!(params.retry.max_attempts(), 2);
        assert_eq!(params.max_concurrency, DEFAULT_MAX_CONCURRENCY);
        assert_eq!(params.attempt_timeout, Some(DEFAULT_ATTEMPT_TIMEOUT));
    }

    #[test]
    fn test_concurrency_floor() {
        let params = WorkflowParams::default().with_max_concurrency(0);
        assert_eq!(params.max_concurrency, 1);
        assert_eq!(WorkflowParams::default().sequential().max_concurrency, 1);
    }

    #[test]
    fn test_builder_models() {
        let params = WorkflowParams::default()
            .with_decomposer_model(Model::new("small"))
            .with_synthesizer_model(Model::new("large"));
        assert_eq!(params.decomposer_model.as_str(), "small");
        assert_eq!(params.synthesizer_model.as_str(), "large");
    }
}
