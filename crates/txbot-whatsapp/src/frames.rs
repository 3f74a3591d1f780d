// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON frames exchanged with the WhatsApp bridge process.
//!
//! Bridge -> Bot:
//! ```json
//! {"type": "message", "contact_id": "519...@c.us", "text": "hola",
//!  "has_media": false, "sender_name": "Maria", "timestamp": "..."}
//! {"type": "qr", "code": "2@abc..."}
//! {"type": "ready"}
//! ```
//!
//! Bot -> Bridge:
//! ```json
//! {"type": "send_text", "to": "519...@c.us", "text": "..."}
//! {"type": "send_media", "to": "519...@c.us", "path": "assets/yape.png", "caption": "..."}
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use txbot_core::{ContactId, InboundMessage};

/// A frame received from the bridge.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundFrame {
    Message {
        contact_id: String,
        text: String,
        #[serde(default)]
        has_media: bool,
        #[serde(default)]
        sender_name: Option<String>,
        timestamp: DateTime<Utc>,
    },
    Qr {
        code: String,
    },
    Ready,
}

/// A frame sent to the bridge.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    SendText {
        to: String,
        text: String,
    },
    SendMedia {
        to: String,
        path: String,
        caption: String,
    },
}

impl InboundFrame {
    /// Converts a `message` frame into the engine's inbound type.
    ///
    /// Returns `None` for the non-message variants.
    pub fn into_message(self) -> Option<InboundMessage> {
        match self {
            InboundFrame::Message {
                contact_id,
                text,
                has_media,
                sender_name,
                timestamp,
            } => Some(InboundMessage {
                contact_id: ContactId(contact_id),
                text,
                has_media,
                sender_name,
                timestamp,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_frame_deserializes_with_defaults() {
        let json = r#"{"type": "message", "contact_id": "51987654321@c.us",
                       "text": "hola", "timestamp": "2026-01-10T12:00:00Z"}"#;
        let frame: InboundFrame = serde_json::from_str(json).unwrap();
        let message = frame.into_message().unwrap();
        assert_eq!(message.contact_id.0, "51987654321@c.us");
        assert!(!message.has_media);
        assert!(message.sender_name.is_none());
    }

    #[test]
    fn qr_and_ready_frames_deserialize() {
        let qr: InboundFrame = serde_json::from_str(r#"{"type": "qr", "code": "2@abc"}"#).unwrap();
        assert!(matches!(qr, InboundFrame::Qr { ref code } if code == "2@abc"));

        let ready: InboundFrame = serde_json::from_str(r#"{"type": "ready"}"#).unwrap();
        assert!(matches!(ready, InboundFrame::Ready));
        assert!(ready.into_message().is_none());
    }

    #[test]
    fn outbound_frames_serialize_expected_shapes() {
        let text = OutboundFrame::SendText {
            to: "51987654321@c.us".into(),
            text: "hola".into(),
        };
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["type"], "send_text");
        assert_eq!(json["to"], "51987654321@c.us");

        let media = OutboundFrame::SendMedia {
            to: "51987654321@c.us".into(),
            path: "assets/yape.png".into(),
            caption: "scan".into(),
        };
        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(json["type"], "send_media");
        assert_eq!(json["path"], "assets/yape.png");
    }
}
