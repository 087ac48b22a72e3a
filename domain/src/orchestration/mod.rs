//! Workflow orchestration domain
//!
//! Phases, the per-sub-question retry policy, result types and the
//! recombination of answers into the synthesizer's context block.

pub mod context;
pub mod entities;
pub mod retry;
pub mod value_objects;
