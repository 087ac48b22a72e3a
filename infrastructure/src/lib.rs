//! Infrastructure layer for subquery
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod rag;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLlmConfig, FileLoggingConfig,
    FileOutputConfig, FileRagConfig, FileWorkflowConfig,
};
pub use logging::JsonlWorkflowLogger;
pub use providers::{OpenAiCompatibleGateway, OpenAiSettings};
pub use rag::{HttpRagAnswerer, RagBackendClient};
