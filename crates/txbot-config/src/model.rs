// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Txbot auto-responder.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Txbot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TxbotConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Fixed business constants (prices, payment accounts, QR asset).
    #[serde(default)]
    pub business: BusinessConfig,

    /// Messaging-channel bridge settings.
    #[serde(default)]
    pub channel: ChannelConfig,

    /// OpenAI fallback-responder settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Flat-file store locations.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Desktop-shell event feed settings.
    #[serde(default)]
    pub shell: ShellConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name the bot signs its transcript lines with.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "Tx Bot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Fixed business constants used in reply texts and the payment flow.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BusinessConfig {
    /// Flyer design price in soles.
    #[serde(default = "default_price_flyer")]
    pub price_flyer: u32,

    /// Human contact phone number shown to customers.
    #[serde(default = "default_phone_contact")]
    pub phone_contact: String,

    /// Yape mobile-payment identifier.
    #[serde(default = "default_yape_id")]
    pub yape_id: String,

    /// BCP account number.
    #[serde(default = "default_bcp_account")]
    pub bcp_account: String,

    /// BCP interbank (CCI) number.
    #[serde(default = "default_bcp_cci")]
    pub bcp_cci: String,

    /// Path to the Yape QR image sent after the pricing reply. The QR is
    /// skipped silently when the file does not exist.
    #[serde(default = "default_qr_asset_path")]
    pub qr_asset_path: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            price_flyer: default_price_flyer(),
            phone_contact: default_phone_contact(),
            yape_id: default_yape_id(),
            bcp_account: default_bcp_account(),
            bcp_cci: default_bcp_cci(),
            qr_asset_path: default_qr_asset_path(),
        }
    }
}

fn default_price_flyer() -> u32 {
    30
}

fn default_phone_contact() -> String {
    "+51 926 516 926".to_string()
}

fn default_yape_id() -> String {
    "901239985".to_string()
}

fn default_bcp_account() -> String {
    "39004006342082".to_string()
}

fn default_bcp_cci() -> String {
    "00239010400634208237".to_string()
}

fn default_qr_asset_path() -> String {
    "assets/yape.png".to_string()
}

/// Messaging-channel bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// WebSocket URL of the local WhatsApp bridge process.
    #[serde(default = "default_bridge_url")]
    pub bridge_url: String,

    /// Contact identifiers that are never processed (own numbers, staff).
    #[serde(default)]
    pub ignored_contacts: Vec<String>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            bridge_url: default_bridge_url(),
            ignored_contacts: Vec::new(),
        }
    }
}

fn default_bridge_url() -> String {
    "ws://127.0.0.1:8799".to_string()
}

/// OpenAI fallback-responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// OpenAI API key. `None` disables the generative fallback; unmatched
    /// messages then always get the fixed apology.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for fallback completions.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    256
}

fn default_timeout_secs() -> u64 {
    30
}

/// Flat-file store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path of the customer-record JSON document.
    #[serde(default = "default_customers_path")]
    pub customers_path: String,

    /// Path of the append-only payment-log JSON array.
    #[serde(default = "default_payments_path")]
    pub payments_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            customers_path: default_customers_path(),
            payments_path: default_payments_path(),
        }
    }
}

fn default_customers_path() -> String {
    "clientes.json".to_string()
}

fn default_payments_path() -> String {
    "pagos.json".to_string()
}

/// Desktop-shell event feed configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Listen address for the shell WebSocket feed.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1:7878".to_string()
}
