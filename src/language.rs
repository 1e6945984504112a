//! Language name normalization
//!
//! Stored language fields hold ISO 639-1 codes. Input may arrive as an
//! English language name ("German"), a code ("de"), or something else
//! entirely; anything unrecognized passes through unchanged.

/// Normalize a language name or code to its ISO 639-1 code.
///
/// Returns the input untouched when it is empty or not a known language,
/// so callers never lose what the user typed.
pub fn to_iso_code(language: &str) -> String {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        return language.to_string();
    }

    let lowered = trimmed.to_lowercase();
    if is_iso_code(&lowered) {
        return lowered;
    }

    match name_to_code(&lowered) {
        Some(code) => code.to_string(),
        None => language.to_string(),
    }
}

fn is_iso_code(lowered: &str) -> bool {
    lowered.len() == 2 && name_table().iter().any(|(_, code)| *code == lowered)
}

fn name_to_code(lowered: &str) -> Option<&'static str> {
    name_table()
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, code)| *code)
}

fn name_table() -> &'static [(&'static str, &'static str)] {
    &[
        ("english", "en"),
        ("french", "fr"),
        ("german", "de"),
        ("spanish", "es"),
        ("portuguese", "pt"),
        ("italian", "it"),
        ("dutch", "nl"),
        ("danish", "da"),
        ("swedish", "sv"),
        ("norwegian", "no"),
        ("finnish", "fi"),
        ("icelandic", "is"),
        ("russian", "ru"),
        ("polish", "pl"),
        ("czech", "cs"),
        ("greek", "el"),
        ("latin", "la"),
        ("hebrew", "he"),
        ("arabic", "ar"),
        ("turkish", "tr"),
        ("japanese", "ja"),
        ("chinese", "zh"),
        ("korean", "ko"),
        ("hindi", "hi"),
        ("hungarian", "hu"),
        ("romanian", "ro"),
        ("ukrainian", "uk"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_to_code() {
        assert_eq!(to_iso_code("German"), "de");
        assert_eq!(to_iso_code("  english "), "en");
        assert_eq!(to_iso_code("FRENCH"), "fr");
    }

    #[test]
    fn test_code_passthrough() {
        assert_eq!(to_iso_code("en"), "en");
        assert_eq!(to_iso_code("DE"), "de");
    }

    #[test]
    fn test_unknown_passthrough() {
        assert_eq!(to_iso_code("Klingon"), "Klingon");
        assert_eq!(to_iso_code("xx"), "xx");
        assert_eq!(to_iso_code(""), "");
    }
}
