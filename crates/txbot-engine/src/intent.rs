// SPDX-FileCopyrightText: 2026 Txbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword intent classification.
//!
//! Pure, stateless functions over message text. All matching is
//! case-insensitive; keyword containment is deliberately substring-based
//! rather than word-boundary-aware ("flyers" should trigger the flyer
//! branch).

/// Greeting tokens. A message is a greeting iff it equals one of these or
/// starts with one followed by a space.
const GREETINGS: &[&str] = &[
    "hola",
    "buenas",
    "buenos días",
    "buenos dias",
    "buenas tardes",
    "buenas noches",
    "hi",
    "hey",
];

/// Triggers the flyer pricing branch.
pub const FLYER_KEYWORDS: &[&str] = &["flyer"];

/// Triggers the specialized-advisor branch.
pub const ADVISOR_KEYWORDS: &[&str] = &[
    "filmacion",
    "filmación",
    "video",
    "videos",
    "drone",
    "fotografia",
    "fotografía",
    "boda",
    "bodas",
    "evento",
    "eventos",
];

/// Payment-proof terms accepted in place of a media attachment.
const PAYMENT_TERMS: &[&str] = &["comprobante", "voucher", "ticket", "pago", "transferencia"];

/// True iff the trimmed, lower-cased text equals a greeting token or starts
/// with one followed by a space. "holamigo" and "no hola" are not greetings.
pub fn is_greeting(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return false;
    }
    GREETINGS
        .iter()
        .any(|g| t == *g || t.starts_with(&format!("{g} ")))
}

/// Substring containment against a keyword list, case-insensitive.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    if text.is_empty() {
        return false;
    }
    let t = text.to_lowercase();
    keywords.iter().any(|k| t.contains(k))
}

/// A message counts as payment proof if it carries a media attachment or
/// its text mentions any payment term.
pub fn looks_like_payment_proof(has_media: bool, text: &str) -> bool {
    has_media || contains_any(text, PAYMENT_TERMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_match_exact_and_prefixed() {
        assert!(is_greeting("hola"));
        assert!(is_greeting("Hola"));
        assert!(is_greeting("  buenas tardes  "));
        assert!(is_greeting("hi"));
        assert!(is_greeting("hey que tal"));
        assert!(is_greeting("hola amigo"));
    }

    #[test]
    fn greetings_require_word_boundary() {
        assert!(!is_greeting("holamigo"));
        assert!(!is_greeting("no hola"));
        assert!(!is_greeting(""));
        assert!(!is_greeting("   "));
        assert!(!is_greeting("quiero un flyer"));
    }

    #[test]
    fn contains_any_is_substring_based() {
        assert!(contains_any("quiero un flyer", FLYER_KEYWORDS));
        assert!(contains_any("FLYERS para mi tienda", FLYER_KEYWORDS));
        assert!(contains_any("precio de filmación de bodas", ADVISOR_KEYWORDS));
        assert!(contains_any("tienen drone?", ADVISOR_KEYWORDS));
        assert!(!contains_any("quiero un logo", FLYER_KEYWORDS));
        assert!(!contains_any("", ADVISOR_KEYWORDS));
    }

    #[test]
    fn payment_proof_accepts_media_or_terms() {
        assert!(looks_like_payment_proof(true, ""));
        assert!(looks_like_payment_proof(false, "aqui va mi comprobante"));
        assert!(looks_like_payment_proof(false, "ya hice el PAGO"));
        assert!(looks_like_payment_proof(false, "le mando la transferencia"));
        assert!(!looks_like_payment_proof(false, "un momento por favor"));
    }
}
