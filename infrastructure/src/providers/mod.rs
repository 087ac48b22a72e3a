//! Text-generation provider adapters
//!
//! - [`openai::OpenAiCompatibleGateway`] - chat completions over HTTP

pub mod openai;

pub use openai::{DEFAULT_OPENAI_URL, OpenAiCompatibleGateway, OpenAiSettings};
