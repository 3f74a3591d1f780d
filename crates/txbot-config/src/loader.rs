// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./txbot.toml` > `~/.config/txbot/txbot.toml` >
//! `/etc/txbot/txbot.toml` with environment variable overrides via `TXBOT_`
//! prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::TxbotConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/txbot/txbot.toml` (system-wide)
/// 3. `~/.config/txbot/txbot.toml` (user XDG config)
/// 4. `./txbot.toml` (local directory)
/// 5. `TXBOT_*` environment variables
pub fn load_config() -> Result<TxbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TxbotConfig::default()))
        .merge(Toml::file("/etc/txbot/txbot.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("txbot/txbot.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("txbot.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TxbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TxbotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TxbotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TxbotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TXBOT_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("TXBOT_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TXBOT_BUSINESS_PRICE_FLYER -> "business_price_flyer"
        let mapped = key
            .as_str()
            .replacen("agent_", "agent.", 1)
            .replacen("business_", "business.", 1)
            .replacen("channel_", "channel.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("shell_", "shell.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_file() {
        let config = load_config_from_str("").expect("defaults should extract");
        assert_eq!(config.agent.name, "Tx Bot");
        assert_eq!(config.business.price_flyer, 30);
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.storage.customers_path, "clientes.json");
    }

    #[test]
    fn toml_overrides_defaults() {
        let toml = r#"
[business]
price_flyer = 45

[channel]
ignored_contacts = ["51901239985@c.us"]
"#;
        let config = load_config_from_str(toml).expect("valid TOML");
        assert_eq!(config.business.price_flyer, 45);
        assert_eq!(config.channel.ignored_contacts, vec!["51901239985@c.us"]);
        // Untouched sections keep defaults.
        assert_eq!(config.shell.listen_addr, "127.0.0.1:7878");
    }
}
