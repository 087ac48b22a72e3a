//! OpenAI-compatible chat completions gateway
//!
//! Implements [`LlmGateway`] against any server exposing
//! `POST {base_url}/chat/completions` (OpenAI, vLLM, Ollama, LM Studio, ...).
//! The gateway is stateless: each session owns its system prompt and sends
//! one request per message.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use subquery_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use subquery_domain::Model;
use tracing::{debug, info};

/// Default API base URL
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Settings for [`OpenAiCompatibleGateway`]
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub base_url: String,
    /// Bearer token; omitted for local servers that need none
    pub api_key: Option<String>,
    pub temperature: f64,
    pub timeout: Duration,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key: None,
            temperature: 0.0,
            timeout: Duration::from_secs(120),
        }
    }
}

struct Endpoint {
    client: Client,
    url: String,
    temperature: f64,
    timeout: Duration,
}

/// LLM Gateway for OpenAI-compatible chat completion APIs
pub struct OpenAiCompatibleGateway {
    endpoint: Arc<Endpoint>,
}

impl OpenAiCompatibleGateway {
    pub fn new(settings: OpenAiSettings) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &settings.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| GatewayError::Other(format!("Invalid API key format: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::ConnectionError(format!("Failed to create client: {}", e)))?;

        let url = format!("{}/chat/completions", settings.base_url.trim_end_matches('/'));
        info!(url = %url, "OpenAI-compatible gateway initialized");

        Ok(Self {
            endpoint: Arc::new(Endpoint {
                client,
                url,
                temperature: settings.temperature,
                timeout: settings.timeout,
            }),
        })
    }

    fn session(&self, model: &Model, system_prompt: &str) -> Box<dyn LlmSession> {
        Box::new(OpenAiSession {
            endpoint: Arc::clone(&self.endpoint),
            model: model.clone(),
            system_prompt: system_prompt.to_string(),
        })
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(self.session(model, system_prompt))
    }
}

/// Request body for chat completions
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// One chat session: a model plus a system prompt (omitted when empty)
pub struct OpenAiSession {
    endpoint: Arc<Endpoint>,
    model: Model,
    system_prompt: String,
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: &self.system_prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content,
        });

        let request = ChatRequest {
            model: self.model.as_str(),
            messages,
            temperature: self.endpoint.temperature,
        };

        debug!(model = %self.model, "POST {}", self.endpoint.url);

        let response = self
            .endpoint
            .client
            .post(&self.endpoint.url)
            .json(&request)
            .timeout(self.endpoint.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::ConnectionError(format!("Connection failed: {}", e))
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(GatewayError::ModelNotAvailable(self.model.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| GatewayError::InvalidResponse("No choices in response".to_string()))
    }
}
