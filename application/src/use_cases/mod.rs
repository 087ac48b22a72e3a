//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod answer_all;
pub mod decompose;
pub mod run_workflow;
pub(crate) mod shared;
pub mod synthesize;

#[cfg(test)]
pub(crate) mod test_support;
