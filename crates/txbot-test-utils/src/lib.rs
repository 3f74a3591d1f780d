// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Txbot integration tests.
//!
//! Provides mock adapters and in-memory stores for fast, deterministic,
//! CI-runnable tests without a bridge process, the OpenAI API, or disk.
//!
//! # Components
//!
//! - [`MemoryStore`] - In-memory customer store and payment ledger
//! - [`MockResponder`] - Scripted generative fallback
//! - [`MockChannel`] - Mock messaging channel with event injection and capture
//! - [`CaptureUiSink`] - Shell sink that records every event

pub mod memory_store;
pub mod mock_channel;
pub mod mock_responder;
pub mod ui_sink;

pub use memory_store::{MemoryLedger, MemoryStore};
pub use mock_channel::{MockChannel, SentMedia, SentText};
pub use mock_responder::MockResponder;
pub use ui_sink::CaptureUiSink;
