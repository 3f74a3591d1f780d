// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `ChannelAdapter` with injectable inbound events
//! and captured outbound sends for assertion in tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use txbot_core::traits::{Adapter, ChannelAdapter};
use txbot_core::{AdapterType, ChannelEvent, ContactId, HealthStatus, TxbotError};

/// A captured `send_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SentText {
    pub to: ContactId,
    pub text: String,
}

/// A captured `send_media` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMedia {
    pub to: ContactId,
    pub path: PathBuf,
    pub caption: String,
}

/// A mock messaging channel for testing.
///
/// Provides two queues:
/// - **inbound**: events injected via `inject()` are returned by `receive()`
/// - **sent**: calls to `send_text`/`send_media` are captured for assertion
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<ChannelEvent>>>,
    sent_texts: Arc<Mutex<Vec<SentText>>>,
    sent_media: Arc<Mutex<Vec<SentMedia>>>,
    notify: Arc<Notify>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent_texts: Arc::new(Mutex::new(Vec::new())),
            sent_media: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Inject an inbound event; the next `receive()` call returns it.
    pub async fn inject(&self, event: ChannelEvent) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// All text replies sent so far.
    pub async fn sent_texts(&self) -> Vec<SentText> {
        self.sent_texts.lock().await.clone()
    }

    /// All media sends so far.
    pub async fn sent_media(&self) -> Vec<SentMedia> {
        self.sent_media.lock().await.clone()
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, TxbotError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TxbotError> {
        Ok(())
    }
}

#[async_trait]
impl ChannelAdapter for MockChannel {
    async fn connect(&mut self) -> Result<(), TxbotError> {
        Ok(())
    }

    async fn send_text(&self, to: &ContactId, text: &str) -> Result<(), TxbotError> {
        self.sent_texts.lock().await.push(SentText {
            to: to.clone(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_media(
        &self,
        to: &ContactId,
        path: &Path,
        caption: &str,
    ) -> Result<(), TxbotError> {
        self.sent_media.lock().await.push(SentMedia {
            to: to.clone(),
            path: path.to_path_buf(),
            caption: caption.to_string(),
        });
        Ok(())
    }

    async fn receive(&self) -> Result<ChannelEvent, TxbotError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }
            // Wait for notification that a new event was injected.
            self.notify.notified().await;
        }
    }
}
