// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as parseable listen addresses and WebSocket URL schemes.

use crate::diagnostic::ConfigError;
use crate::model::TxbotConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TxbotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.business.price_flyer == 0 {
        errors.push(ConfigError::Validation {
            message: "business.price_flyer must be greater than zero".to_string(),
        });
    }

    if config.openai.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.model must not be empty".to_string(),
        });
    }

    if config.openai.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.storage.customers_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.customers_path must not be empty".to_string(),
        });
    }

    if config.storage.payments_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.payments_path must not be empty".to_string(),
        });
    }

    if config.shell.listen_addr.parse::<std::net::SocketAddr>().is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "shell.listen_addr `{}` is not a valid socket address",
                config.shell.listen_addr
            ),
        });
    }

    match url::Url::parse(&config.channel.bridge_url) {
        Ok(parsed) if parsed.scheme() == "ws" || parsed.scheme() == "wss" => {}
        Ok(parsed) => {
            errors.push(ConfigError::Validation {
                message: format!(
                    "channel.bridge_url must use ws:// or wss://, got `{}`",
                    parsed.scheme()
                ),
            });
        }
        Err(e) => {
            errors.push(ConfigError::Validation {
                message: format!("channel.bridge_url is not a valid URL: {e}"),
            });
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
