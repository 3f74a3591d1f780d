// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction, bearer
//! authentication, and error mapping. Requests are single-shot: a failed
//! completion surfaces as an error and the caller falls back to a fixed
//! apology, so there is no retry loop here.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use txbot_core::TxbotError;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Base URL for the OpenAI chat completions endpoint.
const API_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    default_model: String,
    base_url: String,
    timeout: Duration,
}

impl OpenAiClient {
    /// Creates a new OpenAI API client.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key for bearer authentication
    /// * `model` - Default model identifier
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: &str, model: String, timeout: Duration) -> Result<Self, TxbotError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            TxbotError::Config(format!("invalid API key header value: {e}"))
        })?;
        auth.set_sensitive(true);
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| TxbotError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            base_url: API_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Overrides the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends a completion request and returns the parsed response.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, TxbotError> {
        let response = self
            .client
            .post(&self.base_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TxbotError::Timeout {
                        duration: self.timeout,
                    }
                } else {
                    TxbotError::Provider {
                        message: format!("HTTP request failed: {e}"),
                        source: Some(Box::new(e)),
                    }
                }
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| TxbotError::Provider {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;
            let chat_response: ChatResponse =
                serde_json::from_str(&body).map_err(|e| TxbotError::Provider {
                    message: format!("failed to parse API response: {e}"),
                    source: Some(Box::new(e)),
                })?;
            return Ok(chat_response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
            format!(
                "OpenAI API error ({}): {}",
                api_err.error.type_, api_err.error.message
            )
        } else {
            format!("API returned {status}: {body}")
        };
        Err(TxbotError::Provider {
            message,
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::new("test-api-key", "gpt-4o-mini".into(), Duration::from_secs(5))
            .unwrap()
            .with_base_url(base_url.to_string())
    }

    fn test_request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage::user("hola")],
            max_tokens: 256,
        }
    }

    #[tokio::test]
    async fn complete_success() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "chatcmpl-test",
            "choices": [{"message": {"role": "assistant", "content": "¡Hola! 😊"}}]
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete(&test_request()).await.unwrap();

        assert_eq!(result.id, "chatcmpl-test");
        assert_eq!(result.first_text(), Some("¡Hola! 😊"));
    }

    #[tokio::test]
    async fn complete_fails_on_401_with_api_error_detail() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "Incorrect API key"}
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(&error_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete(&test_request()).await;
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid_request_error"), "got: {err}");
    }

    #[tokio::test]
    async fn complete_does_not_retry_on_500() {
        let server = MockServer::start().await;

        // A single attempt, verified by the expect(1) mock.
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.complete(&test_request()).await.is_err());
    }

    #[tokio::test]
    async fn complete_maps_slow_response_to_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let client = OpenAiClient::new(
            "test-api-key",
            "gpt-4o-mini".into(),
            Duration::from_millis(100),
        )
        .unwrap()
        .with_base_url(server.uri());

        let err = client.complete(&test_request()).await.unwrap_err();
        assert!(
            matches!(err, TxbotError::Timeout { .. }),
            "expected timeout, got: {err}"
        );
    }

    #[tokio::test]
    async fn client_sends_bearer_auth() {
        let server = MockServer::start().await;

        let response_body = serde_json::json!({
            "id": "chatcmpl-auth",
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        });

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.complete(&test_request()).await;
        assert!(result.is_ok(), "auth header should match: {result:?}");
    }
}
