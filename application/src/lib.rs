//! Application layer for subquery
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::WorkflowParams;
pub use ports::{
    answerer::{AnswerError, AnswerPort},
    event_logger::{NoWorkflowLogger, WorkflowEvent, WorkflowEventLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::answer_all::AnswerAllUseCase;
pub use use_cases::decompose::{DecomposeError, DecomposeUseCase};
pub use use_cases::run_workflow::{RunWorkflowError, RunWorkflowUseCase};
pub use use_cases::synthesize::{SynthesisOutput, SynthesizeError, SynthesizeUseCase};
