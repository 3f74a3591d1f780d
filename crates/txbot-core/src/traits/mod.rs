// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Every external collaborator of the policy engine sits behind one of
//! these traits so the engine can be driven with in-memory fakes in tests.

pub mod adapter;
pub mod channel;
pub mod responder;
pub mod store;
pub mod ui;

pub use adapter::Adapter;
pub use channel::ChannelAdapter;
pub use responder::ResponderAdapter;
pub use store::{CustomerStore, PaymentLedger};
pub use ui::{NullUiSink, UiSink};
