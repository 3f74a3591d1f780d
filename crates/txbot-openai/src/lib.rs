// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI provider integration for Txbot.
//!
//! Hosts the chat-completions HTTP client and the [`FallbackResponder`]
//! that turns unmatched customer messages into short sales replies.

pub mod client;
pub mod responder;
pub mod types;

pub use client::OpenAiClient;
pub use responder::FallbackResponder;
