// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation policy engine.
//!
//! One inbound message in, an ordered list of [`Command`]s out. The engine
//! owns the in-memory record mapping, mirrors every mutation through the
//! injected [`CustomerStore`], and never touches the channel, the ledger,
//! or the shell directly — a separate dispatcher executes the commands.
//!
//! Routing rules fire in a fixed precedence order and the first match wins:
//! exclusion, bookkeeping, block check, closed short-circuit, payment
//! proof, flyer, advisor, greeting, generative fallback. At most one state
//! transition happens per message.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Utc};
use tracing::{debug, error, info};

use txbot_config::model::{BusinessConfig, TxbotConfig};
use txbot_core::traits::{CustomerStore, ResponderAdapter};
use txbot_core::{
    ContactId, ConversationState, CustomerRecord, InboundMessage, MessageKind, TxbotError, UiEvent,
};

use crate::intent;
use crate::messages;

/// Hours of silence after which a returning contact gets a fresh banner.
const REGREETING_HOURS: f64 = 5.0;

/// Block applied after a conversation closes (payment received, insisting).
const CLOSE_BLOCK_HOURS: i64 = 2;

/// Length of the advisor hand-off window.
const ADVISOR_WINDOW_HOURS: i64 = 1;

/// The only service sold through the automated flow today.
const FLYER_SERVICE: &str = "flyer";

/// A side effect requested by the engine, executed in order by the
/// dispatcher. Replies and media implicitly target the message's sender.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Send a text reply to the contact.
    ReplyText(String),
    /// Send a media file with a caption to the contact.
    SendMedia { path: PathBuf, caption: String },
    /// Append one entry to the payment ledger.
    LogPayment { contact_id: ContactId, service: String },
    /// Forward an event to the desktop shell.
    Notify(UiEvent),
}

/// The per-customer conversation state machine.
pub struct PolicyEngine {
    records: HashMap<ContactId, CustomerRecord>,
    store: Arc<dyn CustomerStore>,
    /// Generative fallback. `None` (no API key) degrades every fallback to
    /// the fixed apology.
    responder: Option<Arc<dyn ResponderAdapter>>,
    business: BusinessConfig,
    agent_name: String,
    ignored: HashSet<String>,
}

impl PolicyEngine {
    /// Loads existing records through the store and builds the engine.
    pub async fn new(
        store: Arc<dyn CustomerStore>,
        responder: Option<Arc<dyn ResponderAdapter>>,
        config: &TxbotConfig,
    ) -> Result<Self, TxbotError> {
        let records = store.load().await?;
        info!(count = records.len(), "customer records loaded");
        Ok(Self {
            records,
            store,
            responder,
            business: config.business.clone(),
            agent_name: config.agent.name.clone(),
            ignored: config.channel.ignored_contacts.iter().cloned().collect(),
        })
    }

    /// Read access to a contact's record, mainly for assertions and the
    /// operator status view.
    pub fn record(&self, contact_id: &ContactId) -> Option<&CustomerRecord> {
        self.records.get(contact_id)
    }

    /// Handles one inbound message and returns the commands to execute.
    ///
    /// `msg.timestamp` is "now" for all time arithmetic, so redelivering a
    /// stored message replays the pass it produced the first time. There is
    /// no deduplication: the same message handled twice runs two full,
    /// independent passes.
    pub async fn handle_message(
        &mut self,
        msg: &InboundMessage,
    ) -> Result<Vec<Command>, TxbotError> {
        // Exclusion pre-check, before any record access.
        if msg.contact_id.is_group()
            || msg.contact_id.is_broadcast()
            || self.ignored.contains(msg.contact_id.as_str())
        {
            debug!(contact = %msg.contact_id, "excluded contact, dropping");
            return Ok(Vec::new());
        }

        let now = msg.timestamp;
        let contact_id = &msg.contact_id;

        // Bookkeeping runs unconditionally, even for messages the block
        // check drops below: the stage and timestamps must always persist.
        let mut record = match self.records.get(contact_id) {
            Some(existing) => existing.clone(),
            None => {
                let fresh = CustomerRecord::new(now);
                self.persist(contact_id, &fresh).await?;
                info!(contact = %contact_id, "new customer record created");
                fresh
            }
        };

        let hours_since_last =
            (now - record.last_interaction_at).num_milliseconds() as f64 / 3_600_000.0;
        record.last_interaction_at = now;
        self.persist(contact_id, &record).await?;

        // Block check: a blocked contact gets no reply and no shell echo.
        if let Some(blocked_until) = record.blocked_until {
            if now < blocked_until {
                debug!(contact = %contact_id, until = %blocked_until, "contact blocked, dropping");
                return Ok(Vec::new());
            }
        }

        // Channel names that are absent or purely numeric are useless in
        // the shell; fall back to the raw identifier for display only.
        let known_name = resolve_known_name(msg.sender_name.as_deref());
        let display_name = known_name
            .clone()
            .unwrap_or_else(|| contact_id.to_string());

        let banner = if !record.is_returning {
            record.is_returning = true;
            self.persist(contact_id, &record).await?;
            messages::first_welcome(known_name.as_deref())
        } else if hours_since_last >= REGREETING_HOURS {
            messages::welcome_back(known_name.as_deref())
        } else {
            String::new()
        };

        let mut commands = Vec::new();
        commands.push(Command::Notify(UiEvent::Message {
            id: contact_id.to_string(),
            tipo: MessageKind::Client,
            texto: msg.text.clone(),
            nombre: display_name,
            hora: wall_clock(now),
        }));

        // Closed is a trap state: it persists even after the block lapses,
        // so every later message short-circuits here until an operator
        // edits the record.
        if record.state == ConversationState::Closed {
            commands.push(self.state_event(contact_id, ConversationState::Closed));
            return Ok(commands);
        }

        if record.state == ConversationState::AwaitingPayment
            && intent::looks_like_payment_proof(msg.has_media, &msg.text)
        {
            commands.push(Command::LogPayment {
                contact_id: contact_id.clone(),
                service: FLYER_SERVICE.to_string(),
            });
            let reply = messages::payment_ack().to_string();
            commands.push(Command::ReplyText(reply.clone()));

            record.state = ConversationState::Closed;
            record.blocked_until = Some(now + Duration::hours(CLOSE_BLOCK_HOURS));
            self.persist(contact_id, &record).await?;

            commands.push(self.bot_message(contact_id, &reply, now));
            commands.push(self.state_event(contact_id, ConversationState::Closed));
            return Ok(commands);
        }

        if intent::contains_any(&msg.text, intent::FLYER_KEYWORDS) {
            let reply = messages::flyer_pricing(&banner, &self.business);
            commands.push(Command::ReplyText(reply.clone()));

            // The QR image is optional: skip it silently if the asset is
            // not on disk.
            let qr_path = PathBuf::from(&self.business.qr_asset_path);
            if qr_path.exists() {
                commands.push(Command::SendMedia {
                    path: qr_path,
                    caption: messages::qr_caption().to_string(),
                });
            }

            record.state = ConversationState::AwaitingPayment;
            self.persist(contact_id, &record).await?;

            commands.push(self.bot_message(contact_id, &reply, now));
            commands.push(self.state_event(contact_id, ConversationState::AwaitingPayment));
            return Ok(commands);
        }

        if intent::contains_any(&msg.text, intent::ADVISOR_KEYWORDS) {
            let window_active = matches!(
                (record.advisor_request_started_at, record.advisor_window_ends_at),
                (Some(_), Some(ends)) if now <= ends
            );

            if !window_active {
                // Fresh request: open a one-hour hand-off window. The block
                // window mirrors it, so repeats are dropped until the block
                // lapses exactly at the window boundary.
                let reply = messages::advisor_notice().to_string();
                commands.push(Command::ReplyText(reply.clone()));

                record.state = ConversationState::AwaitingAdvisor;
                record.advisor_request_started_at = Some(now);
                record.advisor_window_ends_at = Some(now + Duration::hours(ADVISOR_WINDOW_HOURS));
                record.blocked_until = record.advisor_window_ends_at;
                self.persist(contact_id, &record).await?;

                commands.push(self.bot_message(contact_id, &reply, now));
                commands.push(self.state_event(contact_id, ConversationState::AwaitingAdvisor));
                return Ok(commands);
            }

            if record.state == ConversationState::AwaitingAdvisor {
                // Insisting inside the window: close the conversation.
                let reply = messages::advisor_patience().to_string();
                commands.push(Command::ReplyText(reply.clone()));

                record.state = ConversationState::Closed;
                record.blocked_until = Some(now + Duration::hours(CLOSE_BLOCK_HOURS));
                self.persist(contact_id, &record).await?;

                commands.push(self.bot_message(contact_id, &reply, now));
                commands.push(self.state_event(contact_id, ConversationState::Closed));
                return Ok(commands);
            }
            // Window still open but the state moved on: fall through.
        }

        if intent::is_greeting(&msg.text) {
            let reply = messages::menu(&banner, &self.business);
            commands.push(Command::ReplyText(reply.clone()));
            commands.push(self.bot_message(contact_id, &reply, now));
            commands.push(self.state_event(contact_id, ConversationState::Active));
            return Ok(commands);
        }

        // Generative fallback. Failures become a fixed apology with no
        // state change and no retry.
        match self.compose_fallback(&msg.text).await {
            Ok(reply) => {
                commands.push(Command::ReplyText(reply.clone()));
                commands.push(self.bot_message(contact_id, &reply, now));
                commands.push(self.state_event(contact_id, ConversationState::Active));
            }
            Err(e) => {
                error!(contact = %contact_id, error = %e, "fallback responder failed");
                commands.push(Command::ReplyText(messages::apology().to_string()));
            }
        }
        Ok(commands)
    }

    async fn compose_fallback(&self, raw_text: &str) -> Result<String, TxbotError> {
        match &self.responder {
            Some(responder) => responder.compose(raw_text).await,
            None => Err(TxbotError::Provider {
                message: "no fallback responder configured".into(),
                source: None,
            }),
        }
    }

    /// Mirrors a record mutation into the in-memory mapping and the store.
    async fn persist(
        &mut self,
        contact_id: &ContactId,
        record: &CustomerRecord,
    ) -> Result<(), TxbotError> {
        self.records.insert(contact_id.clone(), record.clone());
        self.store.save(&self.records).await
    }

    fn bot_message(&self, contact_id: &ContactId, text: &str, now: DateTime<Utc>) -> Command {
        Command::Notify(UiEvent::Message {
            id: contact_id.to_string(),
            tipo: MessageKind::Bot,
            texto: text.to_string(),
            nombre: self.agent_name.clone(),
            hora: wall_clock(now),
        })
    }

    fn state_event(&self, contact_id: &ContactId, state: ConversationState) -> Command {
        Command::Notify(UiEvent::ContactState {
            id: contact_id.to_string(),
            estado: state.to_string(),
        })
    }
}

/// Accepts a channel-provided name only if it is non-empty and not purely
/// numeric; the channel reports bare phone numbers for unsaved contacts.
fn resolve_known_name(sender_name: Option<&str>) -> Option<String> {
    let name = sender_name?.trim();
    if name.is_empty() || name.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(name.to_string())
}

/// Local wall-clock time for transcript lines, matching the shell's clock.
fn wall_clock(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local).format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_name_rejects_empty_and_numeric() {
        assert_eq!(resolve_known_name(None), None);
        assert_eq!(resolve_known_name(Some("")), None);
        assert_eq!(resolve_known_name(Some("   ")), None);
        assert_eq!(resolve_known_name(Some("51987654321")), None);
        assert_eq!(resolve_known_name(Some("Maria")), Some("Maria".to_string()));
        assert_eq!(
            resolve_known_name(Some("  Jose Luis ")),
            Some("Jose Luis".to_string())
        );
    }

    #[test]
    fn wall_clock_formats_hms() {
        let hora = wall_clock("2026-01-10T15:04:05Z".parse().unwrap());
        assert_eq!(hora.len(), 8);
        assert_eq!(hora.matches(':').count(), 2);
    }
}
