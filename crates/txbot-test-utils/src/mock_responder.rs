// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted generative fallback for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use txbot_core::traits::{Adapter, ResponderAdapter};
use txbot_core::{AdapterType, HealthStatus, TxbotError};

/// A mock fallback responder.
///
/// Replies are scripted with [`push_reply`](MockResponder::push_reply) and
/// consumed in order; an empty script yields a provider error, which is how
/// tests exercise the engine's apology path. Prompts passed to `compose`
/// are captured for assertion.
#[derive(Default)]
pub struct MockResponder {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.replies.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub async fn push_error(&self, message: impl Into<String>) {
        self.replies.lock().await.push_back(Err(message.into()));
    }

    /// All raw texts `compose` was called with, in order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl Adapter for MockResponder {
    fn name(&self) -> &str {
        "mock-responder"
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
impl ResponderAdapter for MockResponder {
    async fn compose(&self, raw_text: &str) -> Result<String, TxbotError> {
        self.prompts.lock().await.push(raw_text.to_string());
        match self.replies.lock().await.pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(TxbotError::Provider { message, source: None }),
            None => Err(TxbotError::Provider {
                message: "mock responder has no scripted reply".into(),
                source: None,
            }),
        }
    }
}
