// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-file implementation of the append-only payment ledger.
//!
//! Each append loads the existing array (unreadable data counts as empty),
//! pushes one entry stamped now, and rewrites the file. Entries are never
//! mutated or removed.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use txbot_core::traits::{Adapter, PaymentLedger};
use txbot_core::{AdapterType, ContactId, HealthStatus, PaymentEvent, TxbotError};

/// Payment ledger backed by a JSON array on disk.
pub struct JsonPaymentLedger {
    path: PathBuf,
}

impl JsonPaymentLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_entries(&self) -> Vec<PaymentEvent> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "payment file corrupt, treating as empty");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Adapter for JsonPaymentLedger {
    fn name(&self) -> &str {
        "json-payments"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, TxbotError> {
        let parent = self.path.parent().unwrap_or_else(|| std::path::Path::new("."));
        match tokio::fs::metadata(parent).await {
            Ok(meta) if meta.is_dir() => Ok(HealthStatus::Healthy),
            _ => Ok(HealthStatus::Unhealthy(format!(
                "cannot write next to {}",
                self.path.display()
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), TxbotError> {
        Ok(())
    }
}

#[async_trait]
impl PaymentLedger for JsonPaymentLedger {
    async fn append(&self, contact_id: &ContactId, service: &str) -> Result<(), TxbotError> {
        let mut entries = self.read_entries().await;
        entries.push(PaymentEvent {
            contact_id: contact_id.clone(),
            service: service.to_string(),
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| TxbotError::Store { source: Box::new(e) })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| TxbotError::Store { source: Box::new(e) })?;

        info!(contact = %contact_id, service, "payment recorded");
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<PaymentEvent>, TxbotError> {
        Ok(self.read_entries().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonPaymentLedger::new(dir.path().join("pagos.json"));
        assert!(ledger.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonPaymentLedger::new(dir.path().join("pagos.json"));

        ledger.append(&ContactId("a@c.us".into()), "flyer").await.unwrap();
        ledger.append(&ContactId("b@c.us".into()), "flyer").await.unwrap();
        ledger.append(&ContactId("a@c.us".into()), "flyer").await.unwrap();

        let entries = ledger.entries().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].contact_id.as_str(), "a@c.us");
        assert_eq!(entries[1].contact_id.as_str(), "b@c.us");
        assert_eq!(entries[2].contact_id.as_str(), "a@c.us");
        assert!(entries.iter().all(|e| e.service == "flyer"));
    }

    #[tokio::test]
    async fn corrupt_file_is_treated_as_empty_on_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagos.json");
        std::fs::write(&path, "[ not json").unwrap();

        let ledger = JsonPaymentLedger::new(&path);
        ledger.append(&ContactId("a@c.us".into()), "flyer").await.unwrap();

        let entries = ledger.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
    }
}
