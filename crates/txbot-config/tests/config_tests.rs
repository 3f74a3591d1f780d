// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Txbot configuration system.

use txbot_config::model::TxbotConfig;
use txbot_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_txbot_config() {
    let toml = r#"
[agent]
name = "Tx Bot"
log_level = "debug"

[business]
price_flyer = 30
phone_contact = "+51 926 516 926"
yape_id = "901239985"
bcp_account = "39004006342082"
bcp_cci = "00239010400634208237"
qr_asset_path = "assets/yape.png"

[channel]
bridge_url = "ws://127.0.0.1:8799"
ignored_contacts = ["51901239985@c.us", "51926516926@c.us"]

[openai]
api_key = "sk-test-123"
model = "gpt-4o-mini"
max_tokens = 256
timeout_secs = 20

[storage]
customers_path = "clientes.json"
payments_path = "pagos.json"

[shell]
listen_addr = "127.0.0.1:7878"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "Tx Bot");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.business.price_flyer, 30);
    assert_eq!(config.business.yape_id, "901239985");
    assert_eq!(config.channel.ignored_contacts.len(), 2);
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.openai.timeout_secs, 20);
    assert_eq!(config.storage.payments_path, "pagos.json");
    assert_eq!(config.shell.listen_addr, "127.0.0.1:7878");
}

/// Unknown field in a section is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_business_produces_error() {
    let toml = r#"
[business]
price_flyers = 30
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("price_flyers"),
        "error should mention the bad key, got: {err_str}"
    );
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_produces_error() {
    let toml = r#"
[telegram]
bot_token = "abc"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown section");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telegram"),
        "error should mention the bad section, got: {err_str}"
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("[agent]\nname = \"Txbot Test\"\n").expect("valid");
    assert_eq!(config.agent.name, "Txbot Test");
    assert_eq!(config.business.price_flyer, 30);
    assert!(config.openai.api_key.is_none());
    assert!(config.channel.ignored_contacts.is_empty());
}

/// load_and_validate_str rejects semantically invalid values.
#[test]
fn validation_rejects_bad_values_after_deserialization() {
    let toml = r#"
[business]
price_flyer = 0
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("price_flyer"));
}

/// Defaults satisfy validation end to end.
#[test]
fn default_config_passes_validation() {
    let config = load_and_validate_str("").expect("defaults valid");
    let roundtrip = toml::to_string(&config).expect("serializes back to TOML");
    let reparsed: TxbotConfig = toml::from_str(&roundtrip).expect("round-trips");
    assert_eq!(reparsed.business.price_flyer, config.business.price_flyer);
}
