// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sink trait for the desktop-shell event feed.

use crate::types::UiEvent;

/// Fire-and-forget sink for shell notifications.
///
/// The engine emits events into this sink and never reads anything back;
/// with no shell attached, events are dropped silently.
pub trait UiSink: Send + Sync + 'static {
    fn notify(&self, event: UiEvent);
}

/// A sink that discards every event. Used when running headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUiSink;

impl UiSink for NullUiSink {
    fn notify(&self, _event: UiEvent) {}
}
