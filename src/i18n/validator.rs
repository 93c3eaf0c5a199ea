//! Translation table validation.
//!
//! Checks a language's table against the canonical table of its family:
//! same keys, no empty strings, and the same `{placeholder}` tokens in every
//! entry so templates can be filled the same way in every language.

use super::language::Locale;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Problems that would break rendering
    pub errors: Vec<String>,

    /// Suspicious but harmless findings
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

pub struct TableValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TableValidator {
    /// Compare `table` against `canonical`, both given as `(key, text)` pairs.
    pub fn validate(
        canonical: &[(&'static str, &'static str)],
        table: &[(&'static str, &'static str)],
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (key, text) in table {
            if text.trim().is_empty() {
                report.errors.push(format!("Empty string for key '{}'", key));
            }
        }

        for (key, canonical_text) in canonical {
            let Some((_, text)) = table.iter().find(|(k, _)| k == key) else {
                report.errors.push(format!("Missing key '{}'", key));
                continue;
            };

            let expected = Self::extract_placeholders(canonical_text);
            let actual = Self::extract_placeholders(text);
            if expected != actual {
                report.errors.push(format!(
                    "Placeholder mismatch for '{}': canonical has {:?}, table has {:?}",
                    key, expected, actual
                ));
            }

            if text == canonical_text {
                report
                    .warnings
                    .push(format!("Key '{}' is identical to the canonical text", key));
            }
        }

        for (key, _) in table {
            if !canonical.iter().any(|(k, _)| k == key) {
                report.warnings.push(format!("Unknown key '{}'", key));
            }
        }

        report
    }

    /// Validate every language of a family against its default language.
    pub fn validate_locale<L: Locale>() -> Vec<(L, ValidationReport)> {
        let canonical = L::fallback().entries();
        L::all()
            .iter()
            .filter(|lang| **lang != L::fallback())
            .map(|lang| (*lang, Self::validate(&canonical, &lang.entries())))
            .collect()
    }

    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{AdminLanguage, Language};

    #[test]
    fn test_extract_placeholders() {
        let found = TableValidator::extract_placeholders("Комнат: {count}, {area} м²");
        assert_eq!(
            found.into_iter().collect::<Vec<_>>(),
            vec!["area".to_string(), "count".to_string()]
        );
    }

    #[test]
    fn test_extract_placeholders_ignores_plain_braces() {
        assert!(TableValidator::extract_placeholders("{}").is_empty());
        assert!(TableValidator::extract_placeholders("{Count}").is_empty());
    }

    #[test]
    fn test_clean_table() {
        let canonical = [("a", "Привет {name}"), ("b", "Пока")];
        let table = [("a", "Salom {name}"), ("b", "Xayr")];
        assert!(TableValidator::validate(&canonical, &table).is_clean());
    }

    #[test]
    fn test_missing_key_and_empty_string_are_errors() {
        let canonical = [("a", "Привет"), ("b", "Пока")];
        let table = [("a", "  ")];
        let report = TableValidator::validate(&canonical, &table);
        assert!(report.errors.iter().any(|e| e.contains("Missing key 'b'")));
        assert!(report.errors.iter().any(|e| e.contains("Empty string for key 'a'")));
    }

    #[test]
    fn test_placeholder_mismatch_is_error() {
        let canonical = [("rooms", "Комнат: {count}")];
        let table = [("rooms", "Xonalar: {number}")];
        let report = TableValidator::validate(&canonical, &table);
        assert!(report.has_errors());
        assert!(report.errors[0].contains("rooms"));
    }

    #[test]
    fn test_identical_text_and_unknown_key_are_warnings() {
        let canonical = [("a", "Галерея")];
        let table = [("a", "Галерея"), ("extra", "x")];
        let report = TableValidator::validate(&canonical, &table);
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_shipped_public_tables_are_valid() {
        for (lang, report) in TableValidator::validate_locale::<Language>() {
            assert!(!report.has_errors(), "{}: {:?}", lang, report.errors);
        }
    }

    #[test]
    fn test_shipped_admin_tables_are_valid() {
        for (lang, report) in TableValidator::validate_locale::<AdminLanguage>() {
            assert!(!report.has_errors(), "{}: {:?}", lang, report.errors);
        }
    }
}
