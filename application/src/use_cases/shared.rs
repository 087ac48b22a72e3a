//! Shared utilities for use cases.
//!
//! Timeout-bounded LLM interaction used by the decomposition and synthesis
//! use cases.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use std::time::Duration;
use subquery_domain::Model;
use tracing::debug;

/// Open a session with `system_prompt` and send one prompt.
///
/// When `timeout` is set, the whole exchange (session creation and send) is
/// bounded by it and an elapsed timeout becomes [`GatewayError::Timeout`].
pub(crate) async fn send_with_system_prompt<G: LlmGateway + ?Sized>(
    gateway: &G,
    model: &Model,
    system_prompt: &str,
    prompt: &str,
    timeout: Option<Duration>,
) -> Result<String, GatewayError> {
    let exchange = async {
        let session = gateway
            .create_session_with_system_prompt(model, system_prompt)
            .await?;
        debug!(model = %session.model(), prompt_len = prompt.len(), "Sending prompt");
        session.send(prompt).await
    };

    match timeout {
        Some(limit) => tokio::time::timeout(limit, exchange)
            .await
            .map_err(|_| GatewayError::Timeout)?,
        None => exchange.await,
    }
}
