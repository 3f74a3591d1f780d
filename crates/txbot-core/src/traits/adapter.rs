// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all external-boundary adapters implement.

use async_trait::async_trait;

use crate::error::TxbotError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Txbot adapters.
///
/// Every adapter (channel, provider, store) implements this trait, which
/// provides identity, lifecycle, and health check capabilities.
#[async_trait]
pub trait Adapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the type of adapter (channel, provider, store).
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, TxbotError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), TxbotError>;
}
