// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for the messaging-channel boundary.

use std::path::Path;

use async_trait::async_trait;

use crate::error::TxbotError;
use crate::traits::adapter::Adapter;
use crate::types::{ChannelEvent, ContactId};

/// Adapter for the messaging channel the auto-responder lives on.
///
/// The channel's session machinery (pairing, delivery, receipts) is a
/// black box behind this trait: the core only sends text or media to a
/// contact and pulls the next inbound event.
#[async_trait]
pub trait ChannelAdapter: Adapter {
    /// Establishes the channel session.
    async fn connect(&mut self) -> Result<(), TxbotError>;

    /// Sends a text reply to a contact. Fire-and-forget from the engine's
    /// perspective; failures surface here and are logged by the dispatcher.
    async fn send_text(&self, to: &ContactId, text: &str) -> Result<(), TxbotError>;

    /// Sends a media file with a caption to a contact.
    async fn send_media(
        &self,
        to: &ContactId,
        path: &Path,
        caption: &str,
    ) -> Result<(), TxbotError>;

    /// Receives the next event (inbound message, pairing QR, ready).
    async fn receive(&self) -> Result<ChannelEvent, TxbotError>;
}
