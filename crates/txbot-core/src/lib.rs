// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Txbot auto-responder.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Txbot workspace. The channel, provider,
//! and store boundaries all implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TxbotError;
pub use types::{
    AdapterType, ChannelEvent, ContactId, ConversationState, CustomerRecord, HealthStatus,
    InboundMessage, MessageKind, PaymentEvent, UiEvent,
};

// Re-export all adapter traits at crate root.
pub use traits::{Adapter, ChannelAdapter, CustomerStore, PaymentLedger, ResponderAdapter, UiSink};
