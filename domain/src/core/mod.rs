//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`] - the LLM model addressed by the text-generation backend
//! - [`question::Question`] / [`question::SubQuestion`] - the original question and its parts
//! - [`error::DomainError`] - domain-level errors

pub mod error;
pub mod model;
pub mod question;
pub mod string;
