// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative fallback responder backed by the OpenAI client.
//!
//! Messages that match no keyword rule end up here. The responder wraps the
//! raw customer text in a fixed sales-assistant prompt and returns the
//! model's reply verbatim (trimmed).

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use txbot_config::model::OpenAiConfig;
use txbot_core::traits::{Adapter, ResponderAdapter};
use txbot_core::{AdapterType, HealthStatus, TxbotError};

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest};

/// Reply used when the model returns an empty completion.
const EMPTY_COMPLETION_PLACEHOLDER: &str = "👌";

/// Sales-assistant responder for unmatched customer messages.
pub struct FallbackResponder {
    client: OpenAiClient,
    max_tokens: u32,
}

impl FallbackResponder {
    /// Builds a responder from the `[openai]` config section.
    ///
    /// Returns `None` when no API key is configured; the caller then runs
    /// without a generative fallback.
    pub fn from_config(config: &OpenAiConfig) -> Result<Option<Self>, TxbotError> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(None);
        };
        let client = OpenAiClient::new(
            api_key,
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Some(Self {
            client,
            max_tokens: config.max_tokens,
        }))
    }

    /// Builds a responder around an existing client (for tests).
    pub fn with_client(client: OpenAiClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    fn build_prompt(raw_text: &str) -> String {
        format!(
            "\
Eres el asistente vendedor de Tx Publicidad.
Responde breve, natural, amistoso y con emojis.
- Solo da precio de flyers (S/30).
- Si mencionan filmación, video, drone, fotografía o bodas → di que un asesor especializado se comunicará pronto.
- Para respuestas cortas del cliente como \"ok\", \"vale\", \"gracias\", \"bien\", responde con algo humano y cordial (ej: \"¡Perfecto! 🙌\", \"Genial 👍\", \"Con gusto 😉\").
- No inventes precios ni servicios.
- Sé humano, fluido y vendedor natural.

Cliente: {raw_text}
Asistente:"
        )
    }
}

#[async_trait]
impl Adapter for FallbackResponder {
    fn name(&self) -> &str {
        "openai-fallback"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, TxbotError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TxbotError> {
        Ok(())
    }
}

#[async_trait]
impl ResponderAdapter for FallbackResponder {
    async fn compose(&self, raw_text: &str) -> Result<String, TxbotError> {
        let request = ChatRequest {
            model: self.client.default_model().to_string(),
            messages: vec![ChatMessage::user(Self::build_prompt(raw_text))],
            max_tokens: self.max_tokens,
        };
        let response = self.client.complete(&request).await?;
        let reply = response
            .first_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(EMPTY_COMPLETION_PLACEHOLDER)
            .to_string();
        debug!(chars = reply.chars().count(), "fallback reply composed");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn responder_for(server: &MockServer) -> FallbackResponder {
        let client = OpenAiClient::new("test-key", "gpt-4o-mini".into(), Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.uri());
        FallbackResponder::with_client(client, 256)
    }

    #[test]
    fn prompt_embeds_raw_customer_text() {
        let prompt = FallbackResponder::build_prompt("cuánto cuesta?");
        assert!(prompt.contains("Cliente: cuánto cuesta?"));
        assert!(prompt.starts_with("Eres el asistente vendedor de Tx Publicidad."));
        assert!(prompt.ends_with("Asistente:"));
    }

    #[test]
    fn from_config_without_key_disables_fallback() {
        let config = OpenAiConfig::default();
        assert!(FallbackResponder::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn compose_trims_model_reply() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "id": "chatcmpl-1",
            "choices": [{"message": {"role": "assistant", "content": "  ¡Genial! 👍  "}}]
        });
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({"model": "gpt-4o-mini"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let reply = responder_for(&server).compose("ok").await.unwrap();
        assert_eq!(reply, "¡Genial! 👍");
    }

    #[tokio::test]
    async fn compose_substitutes_placeholder_for_empty_completion() {
        let server = MockServer::start().await;
        let body = serde_json::json!({
            "id": "chatcmpl-2",
            "choices": [{"message": {"role": "assistant", "content": "   "}}]
        });
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let reply = responder_for(&server).compose("gracias").await.unwrap();
        assert_eq!(reply, EMPTY_COMPLETION_PLACEHOLDER);
    }

    #[tokio::test]
    async fn compose_propagates_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = responder_for(&server).compose("hola").await;
        assert!(matches!(result, Err(TxbotError::Provider { .. })));
    }
}
