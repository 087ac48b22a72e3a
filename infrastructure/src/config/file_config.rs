//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application types
//! after validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use subquery_application::WorkflowParams;
use subquery_domain::{Model, RetryPolicy};
use thiserror::Error;

use crate::providers::DEFAULT_OPENAI_URL;
use crate::rag::DEFAULT_RAG_URL;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    ZeroValue(&'static str),

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("{0} cannot be empty")]
    EmptyUrl(&'static str),

    #[error("unknown output format: {0} (expected full, answer or json)")]
    UnknownOutputFormat(String),
}

/// Raw text-generation configuration from TOML (`[llm]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Model used to decompose questions
    pub decomposer_model: String,
    /// Model used to synthesize the final answer
    pub synthesizer_model: String,
    /// Sampling temperature
    pub temperature: f64,
    /// Timeout in seconds for a decomposition or synthesis call
    pub timeout_seconds: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            decomposer_model: Model::default().to_string(),
            synthesizer_model: Model::default().to_string(),
            temperature: 0.0,
            timeout_seconds: 120,
        }
    }
}

/// Raw RAG backend configuration from TOML (`[rag]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRagConfig {
    /// Base URL of the backend exposing `/invoke` and `/batch`
    pub base_url: String,
    /// HTTP timeout in seconds for one backend request
    pub timeout_seconds: u64,
}

impl Default for FileRagConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RAG_URL.to_string(),
            timeout_seconds: 60,
        }
    }
}

/// Raw workflow configuration from TOML (`[workflow]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkflowConfig {
    /// Attempts per sub-question
    pub max_attempts: u32,
    /// Timeout in seconds for one answer attempt
    pub attempt_timeout_seconds: u64,
    /// Sub-questions answered at the same time (1 = sequential)
    pub max_concurrency: usize,
}

impl Default for FileWorkflowConfig {
    fn default() -> Self {
        let params = WorkflowParams::default();
        Self {
            max_attempts: params.retry.max_attempts(),
            attempt_timeout_seconds: params.attempt_timeout.map_or(60, |d| d.as_secs()),
            max_concurrency: params.max_concurrency,
        }
    }
}

/// Raw output configuration from TOML (`[output]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format: "full", "answer" or "json"
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw logging configuration from TOML (`[logging]`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving workflow events
    pub events_file: Option<String>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub llm: FileLlmConfig,
    pub rag: FileRagConfig,
    pub workflow: FileWorkflowConfig,
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyUrl("llm.base_url"));
        }
        if self.rag.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyUrl("rag.base_url"));
        }
        if self.llm.decomposer_model.trim().is_empty()
            || self.llm.synthesizer_model.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyModelName);
        }

        let zero_checks = [
            ("llm.timeout_seconds", self.llm.timeout_seconds),
            ("rag.timeout_seconds", self.rag.timeout_seconds),
            ("workflow.max_attempts", u64::from(self.workflow.max_attempts)),
            (
                "workflow.attempt_timeout_seconds",
                self.workflow.attempt_timeout_seconds,
            ),
            ("workflow.max_concurrency", self.workflow.max_concurrency as u64),
        ];
        for (name, value) in zero_checks {
            if value == 0 {
                return Err(ConfigValidationError::ZeroValue(name));
            }
        }

        if let Some(format) = &self.output.format
            && !matches!(format.as_str(), "full" | "answer" | "json")
        {
            return Err(ConfigValidationError::UnknownOutputFormat(format.clone()));
        }

        Ok(())
    }

    /// Convert into validated workflow parameters
    pub fn workflow_params(&self) -> Result<WorkflowParams, ConfigValidationError> {
        self.validate()?;

        let retry = RetryPolicy::new(self.workflow.max_attempts)
            .map_err(|_| ConfigValidationError::ZeroValue("workflow.max_attempts"))?;

        Ok(WorkflowParams::default()
            .with_decomposer_model(Model::new(&self.llm.decomposer_model))
            .with_synthesizer_model(Model::new(&self.llm.synthesizer_model))
            .with_retry(retry)
            .with_attempt_timeout(Some(Duration::from_secs(
                self.workflow.attempt_timeout_seconds,
            )))
            .with_llm_timeout(Some(Duration::from_secs(self.llm.timeout_seconds)))
            .with_max_concurrency(self.workflow.max_concurrency))
    }
}
