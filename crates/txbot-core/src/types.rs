// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Txbot auto-responder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a messaging-channel peer (e.g. `51987654321@c.us`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactId(pub String);

impl ContactId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Group chat identifiers carry the `@g.us` suffix on this channel.
    pub fn is_group(&self) -> bool {
        self.0.ends_with("@g.us")
    }

    /// The channel's status-broadcast pseudo-contact.
    pub fn is_broadcast(&self) -> bool {
        self.0 == "status@broadcast"
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Provider,
    Store,
}

/// An inbound customer message, normalized to a channel-agnostic shape.
///
/// `timestamp` is the delivery time and acts as "now" for the policy
/// engine's freshness, block, and advisor-window arithmetic.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub contact_id: ContactId,
    pub text: String,
    pub has_media: bool,
    /// Channel-provided contact name, if any. Purely numeric names are
    /// rejected downstream during display-name resolution.
    pub sender_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// An event delivered by a channel adapter's receive loop.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    /// An inbound customer message.
    Message(InboundMessage),
    /// A pairing QR code, already rendered to a data URL for the shell.
    PairingQr(String),
    /// The channel session is established and ready.
    Ready,
}

/// Conversation stage of a customer.
///
/// `Active` is reported to the shell but never stored: records move from
/// `New` directly into `AwaitingPayment`/`AwaitingAdvisor`/`Closed`.
/// `Closed` has no automatic exit; see the policy engine docs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, Default,
)]
pub enum ConversationState {
    #[default]
    #[serde(rename = "nuevo")]
    #[strum(serialize = "nuevo")]
    New,
    #[serde(rename = "activo")]
    #[strum(serialize = "activo")]
    Active,
    #[serde(rename = "esperando_pago")]
    #[strum(serialize = "esperando_pago")]
    AwaitingPayment,
    #[serde(rename = "esperando_asesor")]
    #[strum(serialize = "esperando_asesor")]
    AwaitingAdvisor,
    #[serde(rename = "cerrado")]
    #[strum(serialize = "cerrado")]
    Closed,
}

/// Per-contact conversation record, persisted in the customer store.
///
/// Created lazily on the first observed message from a contact, mutated on
/// every subsequent one, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// True after the first handled interaction; gates the welcome banner.
    #[serde(default)]
    pub is_returning: bool,
    /// While `now < blocked_until`, inbound messages from this contact get
    /// no reply at all. Bookkeeping timestamps still advance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state: ConversationState,
    pub last_interaction_at: DateTime<Utc>,
    /// Set when an advisor-intent message first arrives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_request_started_at: Option<DateTime<Utc>>,
    /// `advisor_request_started_at + 1h`; repeats inside this window count
    /// as "insisting".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_window_ends_at: Option<DateTime<Utc>>,
}

impl CustomerRecord {
    /// Fresh record for a first-time contact.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            is_returning: false,
            blocked_until: None,
            state: ConversationState::New,
            last_interaction_at: now,
            advisor_request_started_at: None,
            advisor_window_ends_at: None,
        }
    }
}

/// A completed payment, appended to the payment ledger. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEvent {
    #[serde(rename = "cliente")]
    pub contact_id: ContactId,
    #[serde(rename = "servicio")]
    pub service: String,
    #[serde(rename = "fecha")]
    pub timestamp: DateTime<Utc>,
}

/// Who a transcript line is attributed to in the shell view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    #[serde(rename = "cliente")]
    Client,
    #[serde(rename = "bot")]
    Bot,
}

/// Fire-and-forget event for the desktop shell.
///
/// Serialized shapes match what the shell's chat view expects; field names
/// are part of the wire contract and stay in Spanish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum UiEvent {
    /// One transcript line (customer echo or bot reply).
    #[serde(rename = "mensaje-bot")]
    Message {
        id: String,
        tipo: MessageKind,
        texto: String,
        nombre: String,
        /// Local wall-clock `HH:MM:SS`.
        hora: String,
    },
    /// Conversation stage change for the contact list.
    #[serde(rename = "estado-cliente")]
    ContactState { id: String, estado: String },
    /// Pairing QR code as a data URL.
    #[serde(rename = "qr")]
    Qr {
        #[serde(rename = "dataUrl")]
        data_url: String,
    },
    /// Channel connected and ready.
    #[serde(rename = "listo")]
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_id_group_and_broadcast_detection() {
        assert!(ContactId("123456@g.us".into()).is_group());
        assert!(!ContactId("123456@c.us".into()).is_group());
        assert!(ContactId("status@broadcast".into()).is_broadcast());
        assert!(!ContactId("status@c.us".into()).is_broadcast());
    }

    #[test]
    fn conversation_state_round_trips_through_serde() {
        for state in [
            ConversationState::New,
            ConversationState::Active,
            ConversationState::AwaitingPayment,
            ConversationState::AwaitingAdvisor,
            ConversationState::Closed,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            let parsed: ConversationState = serde_json::from_str(&json).unwrap();
            assert_eq!(state, parsed);
        }
    }

    #[test]
    fn conversation_state_displays_wire_names() {
        assert_eq!(ConversationState::AwaitingPayment.to_string(), "esperando_pago");
        assert_eq!(ConversationState::Closed.to_string(), "cerrado");
        assert_eq!(ConversationState::Active.to_string(), "activo");
    }

    #[test]
    fn customer_record_defaults_for_missing_fields() {
        // Records written by older versions lack the advisor fields.
        let json = r#"{"last_interaction_at":"2026-01-10T12:00:00Z"}"#;
        let record: CustomerRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_returning);
        assert_eq!(record.state, ConversationState::New);
        assert!(record.blocked_until.is_none());
        assert!(record.advisor_window_ends_at.is_none());
    }

    #[test]
    fn ui_event_message_wire_shape() {
        let event = UiEvent::Message {
            id: "51900000000@c.us".into(),
            tipo: MessageKind::Client,
            texto: "hola".into(),
            nombre: "Maria".into(),
            hora: "10:30:00".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "mensaje-bot");
        assert_eq!(json["tipo"], "cliente");
        assert_eq!(json["nombre"], "Maria");
    }

    #[test]
    fn ui_event_qr_uses_camel_case_data_url() {
        let event = UiEvent::Qr {
            data_url: "data:image/svg+xml;base64,abc".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "qr");
        assert!(json["dataUrl"].as_str().unwrap().starts_with("data:"));
    }

    #[test]
    fn payment_event_uses_spanish_field_names() {
        let event = PaymentEvent {
            contact_id: ContactId("51900000000@c.us".into()),
            service: "flyer".into(),
            timestamp: "2026-01-10T12:00:00Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["cliente"], "51900000000@c.us");
        assert_eq!(json["servicio"], "flyer");
        assert!(json["fecha"].is_string());
    }
}
