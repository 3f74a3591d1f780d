// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agent loop for Txbot.
//!
//! The [`AgentLoop`] is the single consumer of the channel: it receives
//! events one at a time, runs each customer message through the policy
//! engine, and executes the resulting commands in order. Messages are
//! handled strictly sequentially, so two messages from the same contact
//! can never interleave their state transitions.

pub mod shutdown;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use txbot_core::traits::{ChannelAdapter, PaymentLedger, UiSink};
use txbot_core::{ChannelEvent, ContactId, TxbotError, UiEvent};
use txbot_engine::{Command, PolicyEngine};

/// Coordinates the channel, the policy engine, the payment ledger, and the
/// shell event feed.
pub struct AgentLoop {
    channel: Arc<dyn ChannelAdapter + Send + Sync>,
    engine: PolicyEngine,
    ledger: Arc<dyn PaymentLedger>,
    ui: Arc<dyn UiSink>,
}

impl AgentLoop {
    pub fn new(
        channel: Arc<dyn ChannelAdapter + Send + Sync>,
        engine: PolicyEngine,
        ledger: Arc<dyn PaymentLedger>,
        ui: Arc<dyn UiSink>,
    ) -> Self {
        Self {
            channel,
            engine,
            ledger,
            ui,
        }
    }

    /// Runs the loop until the cancellation token fires or the channel
    /// closes.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), TxbotError> {
        info!("agent loop running");

        loop {
            tokio::select! {
                event = self.channel.receive() => {
                    match event {
                        Ok(event) => self.handle_event(event).await,
                        Err(e) => {
                            error!(error = %e, "channel receive error, stopping");
                            break;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    info!("shutdown signal received, stopping agent loop");
                    break;
                }
            }
        }

        self.channel.shutdown().await?;
        info!("agent loop stopped");
        Ok(())
    }

    async fn handle_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Message(message) => {
                debug!(contact_id = %message.contact_id, "handling inbound message");
                match self.engine.handle_message(&message).await {
                    Ok(commands) => {
                        self.dispatch(&message.contact_id, commands).await;
                    }
                    Err(e) => {
                        error!(
                            contact_id = %message.contact_id,
                            error = %e,
                            "policy engine failed for message"
                        );
                    }
                }
            }
            ChannelEvent::PairingQr(data_url) => {
                info!("pairing QR received");
                self.ui.notify(UiEvent::Qr { data_url });
            }
            ChannelEvent::Ready => {
                info!("channel session ready");
                self.ui.notify(UiEvent::Ready);
            }
        }
    }

    /// Executes the engine's commands in order.
    ///
    /// Channel send failures are logged and dropped: the conversation state
    /// was already persisted by the engine, and the customer's next message
    /// re-enters the state machine normally.
    async fn dispatch(&self, contact_id: &ContactId, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::ReplyText(text) => {
                    if let Err(e) = self.channel.send_text(contact_id, &text).await {
                        warn!(contact_id = %contact_id, error = %e, "reply send failed");
                    }
                }
                Command::SendMedia { path, caption } => {
                    if let Err(e) = self.channel.send_media(contact_id, &path, &caption).await {
                        warn!(contact_id = %contact_id, error = %e, "media send failed");
                    }
                }
                Command::LogPayment {
                    contact_id,
                    service,
                } => {
                    if let Err(e) = self.ledger.append(&contact_id, &service).await {
                        error!(contact_id = %contact_id, error = %e, "payment log failed");
                    }
                }
                Command::Notify(event) => self.ui.notify(event),
            }
        }
    }
}
