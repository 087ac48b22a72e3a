//! Answer port
//!
//! Defines the interface for the RAG answering capability. The retrieval it
//! performs is opaque: one sub-question goes in, answer text (or an error)
//! comes out.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while answering a sub-question
#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Answering capability for a single sub-question
#[async_trait]
pub trait AnswerPort: Send + Sync {
    /// Answer one sub-question
    async fn answer(&self, sub_question: &str) -> Result<String, AnswerError>;
}
