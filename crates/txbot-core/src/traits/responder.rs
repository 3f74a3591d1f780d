// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Responder trait for the generative fallback boundary.

use async_trait::async_trait;

use crate::error::TxbotError;
use crate::traits::adapter::Adapter;

/// Composes a short generated reply for messages no routing rule matched.
///
/// May be slow or fail; the policy engine converts failures into a fixed
/// apology reply and never retries.
#[async_trait]
pub trait ResponderAdapter: Adapter {
    /// Builds a completion for the customer's raw message text.
    async fn compose(&self, raw_text: &str) -> Result<String, TxbotError>;
}
