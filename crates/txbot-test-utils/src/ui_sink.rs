// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shell sink that records every event for assertion.

use std::sync::{Arc, Mutex};

use txbot_core::UiEvent;
use txbot_core::traits::UiSink;

/// Captures all notified events in order.
#[derive(Default, Clone)]
pub struct CaptureUiSink {
    events: Arc<Mutex<Vec<UiEvent>>>,
}

impl CaptureUiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().expect("sink poisoned").clone()
    }
}

impl UiSink for CaptureUiSink {
    fn notify(&self, event: UiEvent) {
        self.events.lock().expect("sink poisoned").push(event);
    }
}
