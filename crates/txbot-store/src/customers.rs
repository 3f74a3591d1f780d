// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-file implementation of the customer store.
//!
//! The record mapping is kept in memory by the policy engine and mirrored
//! here on every mutation as one pretty-printed JSON document. Writes are
//! whole-file rewrites with last-write-wins semantics; the single-threaded
//! message loop guarantees a single writer. A crash mid-write can corrupt
//! the file, which [`load`](txbot_core::CustomerStore::load) treats as an
//! empty store.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, warn};

use txbot_core::traits::{Adapter, CustomerStore};
use txbot_core::{AdapterType, ContactId, CustomerRecord, HealthStatus, TxbotError};

/// Customer store backed by a single JSON document on disk.
pub struct JsonCustomerStore {
    path: PathBuf,
}

impl JsonCustomerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Adapter for JsonCustomerStore {
    fn name(&self) -> &str {
        "json-customers"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, TxbotError> {
        // The store is healthy as long as the parent directory is writable.
        let parent = self.path.parent().unwrap_or_else(|| std::path::Path::new("."));
        match tokio::fs::metadata(parent).await {
            Ok(meta) if meta.is_dir() => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Unhealthy(format!(
                "parent of {} is not a directory",
                self.path.display()
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "cannot stat {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), TxbotError> {
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for JsonCustomerStore {
    async fn load(&self) -> Result<HashMap<ContactId, CustomerRecord>, TxbotError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "customer file missing, starting empty");
                return Ok(HashMap::new());
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "customer file corrupt, starting empty");
                Ok(HashMap::new())
            }
        }
    }

    async fn save(
        &self,
        records: &HashMap<ContactId, CustomerRecord>,
    ) -> Result<(), TxbotError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| TxbotError::Store { source: Box::new(e) })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| TxbotError::Store { source: Box::new(e) })?;
        debug!(path = %self.path.display(), count = records.len(), "customer records saved");
        Ok(())
    }
}
