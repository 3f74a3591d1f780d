// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Flat-file persistence for the Txbot auto-responder.
//!
//! Implements the core [`CustomerStore`](txbot_core::CustomerStore) and
//! [`PaymentLedger`](txbot_core::PaymentLedger) traits over two JSON files
//! whose locations come from [`StorageConfig`](txbot_config::model::StorageConfig).
//! No database: the data set is one small advertising business.

pub mod customers;
pub mod payments;

pub use customers::JsonCustomerStore;
pub use payments::JsonPaymentLedger;

use txbot_config::model::StorageConfig;

/// Builds both stores from the storage section of the config.
pub fn open_stores(config: &StorageConfig) -> (JsonCustomerStore, JsonPaymentLedger) {
    (
        JsonCustomerStore::new(&config.customers_path),
        JsonPaymentLedger::new(&config.payments_path),
    )
}
