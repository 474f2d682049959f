//! Target language configuration.
//!
//! The set of languages to localize into is data, not code: a known-language
//! table maps ISO 639-1 codes to the display names the translation prompt
//! uses, and the run's target set is resolved from configuration against it.

use anyhow::{bail, Result};

/// One translation target: a language code paired with the display name
/// handed to the translation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTarget {
    /// ISO 639-1 language code (e.g., "es"), used as the localization key
    pub code: &'static str,
    /// English display name (e.g., "Spanish"), used in the translation prompt
    pub name: &'static str,
}

/// All languages this tool knows how to name. Extend here, not at call sites.
const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("zh", "Simplified Chinese"),
    ("hi", "Hindi"),
];

/// Look up a single language code in the known-language table.
pub fn lookup(code: &str) -> Option<LanguageTarget> {
    KNOWN_LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(code, name)| LanguageTarget { code, name })
}

/// Resolve a list of configured language codes into targets.
///
/// An unknown code is a configuration error and fails the whole run before
/// any network call is made. Duplicate codes are collapsed, keeping the
/// first occurrence's position.
pub fn resolve_targets(codes: &[String]) -> Result<Vec<LanguageTarget>> {
    let mut targets: Vec<LanguageTarget> = Vec::with_capacity(codes.len());
    for code in codes {
        let code = code.trim();
        if code.is_empty() {
            continue;
        }
        let Some(target) = lookup(code) else {
            bail!(
                "Unknown target language code '{}' (known: {})",
                code,
                KNOWN_LANGUAGES
                    .iter()
                    .map(|(c, _)| *c)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        };
        if !targets.iter().any(|t| t.code == target.code) {
            targets.push(target);
        }
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_code() {
        let target = lookup("es").expect("es should be known");
        assert_eq!(target.code, "es");
        assert_eq!(target.name, "Spanish");
    }

    #[test]
    fn test_lookup_unknown_code() {
        assert!(lookup("xx").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_resolve_targets_preserves_order() {
        let codes = vec!["fr".to_string(), "es".to_string(), "ja".to_string()];
        let targets = resolve_targets(&codes).expect("all codes known");
        let resolved: Vec<&str> = targets.iter().map(|t| t.code).collect();
        assert_eq!(resolved, vec!["fr", "es", "ja"]);
    }

    #[test]
    fn test_resolve_targets_rejects_unknown_code() {
        let codes = vec!["es".to_string(), "klingon".to_string()];
        let err = resolve_targets(&codes).unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn test_resolve_targets_deduplicates() {
        let codes = vec!["es".to_string(), "es".to_string(), "fr".to_string()];
        let targets = resolve_targets(&codes).expect("codes known");
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_resolve_targets_skips_blank_entries() {
        let codes = vec!["es".to_string(), " ".to_string(), "".to_string()];
        let targets = resolve_targets(&codes).expect("codes known");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].code, "es");
    }

    #[test]
    fn test_resolve_targets_trims_whitespace() {
        let codes = vec![" es ".to_string(), "fr".to_string()];
        let targets = resolve_targets(&codes).expect("codes known");
        assert_eq!(targets[0].code, "es");
    }
}
