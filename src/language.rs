use std::collections::HashMap;

use isolang::Language;
use once_cell::sync::Lazy;

/// Language utilities for the supported-language set
///
/// The service translates between a fixed, closed set of languages. The
/// same table backs the CLI validation and the display names substituted
/// into the prompt templates.
/// A supported language: ISO 639-1 code plus the display name used in prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedLanguage {
    /// ISO 639-1 (2-letter) code
    pub code: &'static str,
    /// Human-readable name substituted into prompts
    pub name: &'static str,
}

/// The closed set of languages the service translates between
pub const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage { code: "zh", name: "Chinese" },
    SupportedLanguage { code: "en", name: "English" },
    SupportedLanguage { code: "ja", name: "Japanese" },
    SupportedLanguage { code: "th", name: "Thai" },
];

// @const: code -> display name lookup
static LANGUAGE_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| (lang.code, lang.name))
        .collect()
});

/// Check whether a language code belongs to the supported set
pub fn is_supported(code: &str) -> bool {
    let normalized = code.trim().to_lowercase();
    LANGUAGE_NAMES.contains_key(normalized.as_str())
}

/// Resolve a language code to the display name used inside prompts.
///
/// Codes outside the supported set fall back to the ISO 639-1 registry,
/// and finally to the code itself, mirroring the upstream behavior of
/// passing unknown codes through verbatim.
pub fn display_name(code: &str) -> String {
    let normalized = code.trim().to_lowercase();

    if let Some(name) = LANGUAGE_NAMES.get(normalized.as_str()) {
        return (*name).to_string();
    }

    if normalized.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized) {
            return lang.to_name().to_string();
        }
    }

    code.trim().to_string()
}

/// Check if two language codes refer to the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    code1.trim().to_lowercase() == code2.trim().to_lowercase()
}
