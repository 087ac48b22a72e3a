//! HTTP client for the RAG backend service
//!
//! The backend exposes:
//!
//! | Endpoint | Request | Response |
//! |----------|---------|----------|
//! | `POST /invoke` | `{"question": "..."}` | `{"final_answer": "..."}` |
//! | `POST /batch` | `{"questions": ["...", ...]}` | `{"answers": ["...", ...]}` |
//!
//! [`HttpRagAnswerer`] answers one sub-question per `/invoke` call and is
//! the [`AnswerPort`] adapter used by the workflow.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use subquery_application::ports::answerer::{AnswerError, AnswerPort};
use tracing::{debug, info};

/// Default backend URL
pub const DEFAULT_RAG_URL: &str = "http://localhost:8000";

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    final_answer: String,
}

#[derive(Debug, Serialize)]
struct BatchRequest<'a> {
    questions: &'a [String],
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    answers: Vec<String>,
}

/// Client for the RAG backend's `/invoke` and `/batch` endpoints
#[derive(Debug, Clone)]
pub struct RagBackendClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RagBackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnswerError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AnswerError::ConnectionError(format!("Failed to create client: {}", e)))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!(base_url = %base_url, "RAG backend client initialized");

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Answer a single question via `/invoke`
    pub async fn invoke(&self, question: &str) -> Result<String, AnswerError> {
        let response: InvokeResponse = self.post("invoke", &InvokeRequest { question }).await?;
        Ok(response.final_answer)
    }

    /// Answer several questions in one call via `/batch`
    ///
    /// The backend must return exactly one answer per question.
    pub async fn batch(&self, questions: &[String]) -> Result<Vec<String>, AnswerError> {
        let response: BatchResponse = self.post("batch", &BatchRequest { questions }).await?;
        if response.answers.len() != questions.len() {
            return Err(AnswerError::InvalidResponse(format!(
                "expected {} answers, got {}",
                questions.len(),
                response.answers.len()
            )));
        }
        Ok(response.answers)
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, AnswerError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnswerError::Timeout
                } else {
                    AnswerError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnswerError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AnswerError::InvalidResponse(e.to_string()))
    }
}

/// [`AnswerPort`] adapter backed by the RAG service's `/invoke` endpoint
pub struct HttpRagAnswerer {
    client: RagBackendClient,
}

impl HttpRagAnswerer {
    pub fn new(client: RagBackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnswerPort for HttpRagAnswerer {
    async fn answer(&self, sub_question: &str) -> Result<String, AnswerError> {
        self.client.invoke(sub_question).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> RagBackendClient {
        RagBackendClient::new(&format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_invoke() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoke"))
            .and(body_json(serde_json::json!({"question": "Bank A profit?"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"final_answer": "1.2bn"})),
            )
            .mount(&server)
            .await;

        let answerer = HttpRagAnswerer::new(client(&server));
        assert_eq!(answerer.answer("Bank A profit?").await.unwrap(), "1.2bn");
    }

    #[tokio::test]
    async fn test_invoke_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoke"))
            .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
            .mount(&server)
            .await;

        let err = client(&server).invoke("q").await.unwrap_err();
        match err {
            AnswerError::Backend { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "busy");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invoke_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/invoke"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "x"})),
            )
            .mount(&server)
            .await;

        assert!(matches!(
            client(&server).invoke("q").await,
            Err(AnswerError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/batch"))
            .and(body_json(serde_json::json!({"questions": ["a", "b"]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"answers": ["1", "2"]})),
            )
            .mount(&server)
            .await;

        let answers = client(&server)
            .batch(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(answers, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_batch_count_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/batch"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"answers": ["1"]})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .batch(&["a".to_string(), "b".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, AnswerError::InvalidResponse(_)));
    }
}
