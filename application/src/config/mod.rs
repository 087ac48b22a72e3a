//! Application-level configuration.
//!
//! - [`WorkflowParams`] - models, retry budget, timeouts and fan-out limit

pub mod workflow_params;

pub use workflow_params::WorkflowParams;
