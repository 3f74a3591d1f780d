// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pairing QR rendering.
//!
//! The bridge sends the raw pairing string; the shell expects an image it
//! can drop into an `<img src=...>`, so the code is rendered to an SVG and
//! wrapped in a base64 data URL.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;
use qrcode::render::svg;

use txbot_core::TxbotError;

/// Renders a raw pairing string into an SVG data URL.
pub fn pairing_data_url(code: &str) -> Result<String, TxbotError> {
    let qr = QrCode::new(code.as_bytes()).map_err(|e| TxbotError::Channel {
        message: format!("failed to encode pairing QR: {e}"),
        source: None,
    })?;
    let image = qr
        .render::<svg::Color>()
        .min_dimensions(256, 256)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(image)
    ))
}
