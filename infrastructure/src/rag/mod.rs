//! RAG backend adapters

pub mod backend;

pub use backend::{DEFAULT_RAG_URL, HttpRagAnswerer, RagBackendClient};
