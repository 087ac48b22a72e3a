//! Prompt domain
//!
//! Templates for the decomposition and synthesis prompts.

mod template;

pub use template::PromptTemplate;
