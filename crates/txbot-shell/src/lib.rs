// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Desktop-shell integration for Txbot.
//!
//! The shell renders conversations and the pairing QR; this crate serves
//! it a one-way WebSocket event feed (`mensaje-bot`, `estado-cliente`,
//! `qr`, `listo`).

pub mod notifier;
pub mod server;

pub use notifier::ShellNotifier;
pub use server::ShellServer;
