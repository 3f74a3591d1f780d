// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply text catalog.
//!
//! All customer-facing copy lives here, parameterized by the business
//! constants from config. Texts are Spanish with the channel's `*bold*`
//! markup, matching what the business sends by hand.

use txbot_config::model::BusinessConfig;

/// Banner for a contact's very first handled message.
pub fn first_welcome(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("🎉 Hola *{name}*, bienvenido a *Tx Publicidad*! 🚀"),
        None => "🎉 Bienvenido a *Tx Publicidad*! 🚀".to_string(),
    }
}

/// Banner for a returning contact after five-plus quiet hours.
pub fn welcome_back(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("👋 Bienvenido de nuevo *{name}*!"),
        None => "👋 Bienvenido de nuevo a *Tx Publicidad*!".to_string(),
    }
}

/// Pricing reply for the flyer branch, with payment details.
pub fn flyer_pricing(banner: &str, business: &BusinessConfig) -> String {
    format!(
        "{banner}\n\n✨ El diseño de un *flyer publicitario* cuesta *{price} soles*.\n\
         ⏳ Entrega: 1h - 1.5h.\n\nMétodos de pago:\n📲 *Yape*: {yape}\n🏦 *BCP*: {bcp}\n\
         💳 *CCI*: {cci}\n\n¿Deseas que te envíe el QR de Yape ahora? 😊",
        price = business.price_flyer,
        yape = business.yape_id,
        bcp = business.bcp_account,
        cci = business.bcp_cci,
    )
}

/// Caption attached to the Yape QR image.
pub fn qr_caption() -> &'static str {
    "📲 Escanea este QR para pagar con Yape."
}

/// Acknowledgement after a payment proof arrives.
pub fn payment_ack() -> &'static str {
    "✅ Hemos recibido tu comprobante. Un asesor se comunicará contigo pronto 🙌."
}

/// First reply to an advisor-intent message.
pub fn advisor_notice() -> &'static str {
    "📹 Gracias por tu interés 🙌. Te comunicaremos con un *asesor especializado* en breve. \
     Por favor espera un momento ⏳."
}

/// Reply when the contact insists inside the advisor window.
pub fn advisor_patience() -> &'static str {
    "🙏 Por favor mantén la calma, en breve un asesor se comunicará contigo ⏳."
}

/// Service menu for greeting messages.
pub fn menu(banner: &str, business: &BusinessConfig) -> String {
    format!(
        "{banner}\n\n👉 Podemos ayudarte con:\n- ✨ *Flyer* (S/{price})\n\
         - 📹 *Filmación / Fotografía / Drone* (asesor especializado)\n\n\
         Escribe la opción que prefieras y te damos más detalles.",
        price = business.price_flyer,
    )
}

/// Fixed apology when the generative fallback fails.
pub fn apology() -> &'static str {
    "⚠️ Hubo un problema procesando tu mensaje. Intenta más tarde 🙏."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banners_personalize_when_name_known() {
        assert!(first_welcome(Some("Maria")).contains("*Maria*"));
        assert!(!first_welcome(None).contains('*') || first_welcome(None).contains("Tx Publicidad"));
        assert!(welcome_back(Some("Jose")).contains("*Jose*"));
        assert!(welcome_back(None).contains("Tx Publicidad"));
    }

    #[test]
    fn flyer_pricing_embeds_all_payment_details() {
        let business = BusinessConfig::default();
        let text = flyer_pricing("", &business);
        assert!(text.contains("30 soles"));
        assert!(text.contains(&business.yape_id));
        assert!(text.contains(&business.bcp_account));
        assert!(text.contains(&business.bcp_cci));
    }

    #[test]
    fn menu_shows_configured_price() {
        let mut business = BusinessConfig::default();
        business.price_flyer = 45;
        assert!(menu("", &business).contains("S/45"));
    }
}
