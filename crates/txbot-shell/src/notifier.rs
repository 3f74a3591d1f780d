// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fire-and-forget event fan-out to connected shell clients.

use tokio::sync::broadcast;
use tracing::warn;

use txbot_core::UiEvent;
use txbot_core::traits::UiSink;

/// Broadcasts serialized UI events to every connected shell client.
///
/// Events are serialized once at `notify` time and fanned out over a
/// `broadcast` channel. With no subscribers the send fails silently; the
/// engine never waits on the shell.
#[derive(Clone)]
pub struct ShellNotifier {
    tx: broadcast::Sender<String>,
}

impl ShellNotifier {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(256);
        Self { tx }
    }

    /// Subscribes a new client to the event feed.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    /// Number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ShellNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl UiSink for ShellNotifier {
    fn notify(&self, event: UiEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => {
                // Err here only means nobody is listening.
                let _ = self.tx.send(json);
            }
            Err(e) => warn!("failed to serialize shell event: {e}"),
        }
    }
}
