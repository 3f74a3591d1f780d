// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state machine and message-routing policy for Txbot.
//!
//! This is the core of the auto-responder: given a contact's record and an
//! inbound message, [`PolicyEngine`](policy::PolicyEngine) decides which
//! reply path fires, mutates per-customer state through the injected store,
//! and emits an ordered command list for the dispatcher. Intent detection
//! is plain keyword rules in [`intent`]; customer-facing copy lives in
//! [`messages`].

pub mod intent;
pub mod messages;
pub mod policy;

pub use policy::{Command, PolicyEngine};
