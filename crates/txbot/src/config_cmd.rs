// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `txbot config` command implementation.

use txbot_config::TxbotConfig;

/// Prints the resolved configuration as TOML, with the API key masked.
pub fn print_config(config: &TxbotConfig) {
    println!("{}", render_config(config));
}

fn render_config(config: &TxbotConfig) -> String {
    let mut config = config.clone();
    if config.openai.api_key.is_some() {
        config.openai.api_key = Some("***".into());
    }
    toml::to_string_pretty(&config)
        .unwrap_or_else(|e| format!("# failed to render config: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_config_masks_api_key() {
        let mut config = TxbotConfig::default();
        config.openai.api_key = Some("sk-secret".into());

        let rendered = render_config(&config);
        assert!(rendered.contains("***"));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("price_flyer = 30"));
    }

    #[test]
    fn rendered_config_round_trips() {
        let rendered = render_config(&TxbotConfig::default());
        let reparsed = txbot_config::load_and_validate_str(&rendered)
            .expect("rendered config should parse back");
        assert_eq!(reparsed.shell.listen_addr, "127.0.0.1:7878");
    }
}
