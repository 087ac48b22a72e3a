//! Question decomposition domain
//!
//! Turning one question into the ordered sub-questions that are answered
//! independently.

pub mod parsing;

pub use parsing::parse_sub_questions;
