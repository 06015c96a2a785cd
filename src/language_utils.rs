/*!
 * Language utilities for ISO language code handling.
 *
 * The translation prompt addresses the target language by its English name,
 * so the configured value must resolve to a known language. ISO 639-1
 * two-letter codes, ISO 639-3 three-letter codes, and plain English names
 * are all accepted.
 */

use anyhow::{anyhow, Result};
use isolang::Language;

/// Resolve a language code or name to its English language name
pub fn resolve_language_name(code_or_name: &str) -> Result<String> {
    let normalized = code_or_name.trim();
    if normalized.is_empty() {
        return Err(anyhow!("Empty language code"));
    }

    let lower = normalized.to_lowercase();

    let language = match lower.len() {
        2 => Language::from_639_1(&lower),
        3 => Language::from_639_3(&lower),
        _ => None,
    };

    if let Some(language) = language {
        return Ok(language.to_name().to_string());
    }

    // Accept a plain English language name ("Chinese", "french")
    if let Some(language) = Language::from_name(normalized).or_else(|| {
        let mut chars = lower.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => return None,
        };
        Language::from_name(&capitalized)
    }) {
        return Ok(language.to_name().to_string());
    }

    Err(anyhow!("Invalid language code or name: {}", code_or_name))
}

/// Check whether two language codes refer to the same language
pub fn language_codes_match(a: &str, b: &str) -> bool {
    match (resolve_language_name(a), resolve_language_name(b)) {
        (Ok(name_a), Ok(name_b)) => name_a == name_b,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}
