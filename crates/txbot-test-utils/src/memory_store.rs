// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory customer store and payment ledger.
//!
//! Back the policy engine in tests without touching disk. `MemoryStore`
//! additionally counts saves so tests can assert that bookkeeping persisted
//! even when a message was dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use txbot_core::traits::{Adapter, CustomerStore, PaymentLedger};
use txbot_core::{
    AdapterType, ContactId, CustomerRecord, HealthStatus, PaymentEvent, TxbotError,
};

/// In-memory implementation of [`CustomerStore`].
#[derive(Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<ContactId, CustomerRecord>>>,
    save_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a record, e.g. to start a contact mid-conversation.
    pub async fn seed(&self, contact_id: ContactId, record: CustomerRecord) {
        self.records.lock().await.insert(contact_id, record);
    }

    /// Snapshot of what is currently "persisted".
    pub async fn snapshot(&self) -> HashMap<ContactId, CustomerRecord> {
        self.records.lock().await.clone()
    }

    /// Number of times `save` was called.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Adapter for MemoryStore {
    fn name(&self) -> &str {
        "memory-customers"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, TxbotError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TxbotError> {
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn load(&self) -> Result<HashMap<ContactId, CustomerRecord>, TxbotError> {
        Ok(self.records.lock().await.clone())
    }

    async fn save(
        &self,
        records: &HashMap<ContactId, CustomerRecord>,
    ) -> Result<(), TxbotError> {
        *self.records.lock().await = records.clone();
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory implementation of [`PaymentLedger`].
#[derive(Default)]
pub struct MemoryLedger {
    entries: Arc<Mutex<Vec<PaymentEvent>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Adapter for MemoryLedger {
    fn name(&self) -> &str {
        "memory-payments"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, TxbotError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), TxbotError> {
        Ok(())
    }
}

#[async_trait]
impl PaymentLedger for MemoryLedger {
    async fn append(&self, contact_id: &ContactId, service: &str) -> Result<(), TxbotError> {
        self.entries.lock().await.push(PaymentEvent {
            contact_id: contact_id.clone(),
            service: service.to_string(),
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<PaymentEvent>, TxbotError> {
        Ok(self.entries.lock().await.clone())
    }
}
