// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence traits for customer records and the payment ledger.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::TxbotError;
use crate::traits::adapter::Adapter;
use crate::types::{ContactId, CustomerRecord, PaymentEvent};

/// Load/save access to the per-contact record mapping.
///
/// The policy engine keeps the mapping in memory and mirrors every
/// mutation back through [`save`](CustomerStore::save). Last write wins;
/// there is exactly one writer (single-threaded message handling).
#[async_trait]
pub trait CustomerStore: Adapter {
    /// Loads all records. A missing or unreadable backing file yields an
    /// empty mapping, never an error.
    async fn load(&self) -> Result<HashMap<ContactId, CustomerRecord>, TxbotError>;

    /// Persists the full mapping, replacing whatever was stored before.
    async fn save(
        &self,
        records: &HashMap<ContactId, CustomerRecord>,
    ) -> Result<(), TxbotError>;
}

/// Append-only log of completed payments.
#[async_trait]
pub trait PaymentLedger: Adapter {
    /// Appends one payment entry stamped with the current time.
    async fn append(&self, contact_id: &ContactId, service: &str) -> Result<(), TxbotError>;

    /// Returns all recorded payments in insertion order. A missing or
    /// unreadable backing file yields an empty sequence.
    async fn entries(&self) -> Result<Vec<PaymentEvent>, TxbotError>;
}
