//! Language selections for the public site and the admin area.
//!
//! Each area has its own closed set of languages, its own storage key and its
//! own default. Parsing a persisted code never fails loudly: an unknown code
//! simply yields `None` and the caller falls back to the default.

use super::admin_strings::{AdminStrings, ADMIN_RUSSIAN_STRINGS, ADMIN_UZBEK_CYRILLIC_STRINGS};
use super::strings::{SiteStrings, RUSSIAN_STRINGS, UZBEK_STRINGS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed language set with a persisted code and a translation table.
pub trait Locale: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Translation table type for this language family.
    type Strings: 'static;

    /// Durable storage key the selection is persisted under.
    const STORAGE_KEY: &'static str;

    /// Every value of the set, default first.
    fn all() -> &'static [Self];

    fn code(self) -> &'static str;

    /// Parse a persisted code. Unknown codes yield `None`.
    fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|lang| lang.code() == code)
    }

    /// Default used when nothing valid is persisted.
    fn fallback() -> Self {
        Self::all()[0]
    }

    fn strings(self) -> &'static Self::Strings;

    /// `(key, text)` pairs of this language's table.
    fn entries(self) -> Vec<(&'static str, &'static str)>;

    /// Name of the language in that language, for switchers.
    fn native_name(self) -> &'static str;
}

/// Public site language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "uz")]
    Uzbek,
}

impl Language {
    /// The other language, for a two-way switcher.
    pub fn toggle(self) -> Self {
        match self {
            Language::Russian => Language::Uzbek,
            Language::Uzbek => Language::Russian,
        }
    }

    /// English name, for logs.
    pub fn name(self) -> &'static str {
        match self {
            Language::Russian => "Russian",
            Language::Uzbek => "Uzbek",
        }
    }
}

impl Locale for Language {
    type Strings = SiteStrings;

    const STORAGE_KEY: &'static str = "language";

    fn all() -> &'static [Self] {
        &[Language::Russian, Language::Uzbek]
    }

    fn code(self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::Uzbek => "uz",
        }
    }

    fn strings(self) -> &'static SiteStrings {
        match self {
            Language::Russian => &RUSSIAN_STRINGS,
            Language::Uzbek => &UZBEK_STRINGS,
        }
    }

    fn entries(self) -> Vec<(&'static str, &'static str)> {
        self.strings().entries()
    }

    fn native_name(self) -> &'static str {
        match self {
            Language::Russian => "Русский",
            Language::Uzbek => "O'zbekcha",
        }
    }
}

/// Admin area language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AdminLanguage {
    #[default]
    #[serde(rename = "uz-cyrl")]
    UzbekCyrillic,
    #[serde(rename = "ru")]
    Russian,
}

impl AdminLanguage {
    pub fn toggle(self) -> Self {
        match self {
            AdminLanguage::UzbekCyrillic => AdminLanguage::Russian,
            AdminLanguage::Russian => AdminLanguage::UzbekCyrillic,
        }
    }
}

impl Locale for AdminLanguage {
    type Strings = AdminStrings;

    const STORAGE_KEY: &'static str = "admin-lang";

    fn all() -> &'static [Self] {
        &[AdminLanguage::UzbekCyrillic, AdminLanguage::Russian]
    }

    fn code(self) -> &'static str {
        match self {
            AdminLanguage::UzbekCyrillic => "uz-cyrl",
            AdminLanguage::Russian => "ru",
        }
    }

    fn strings(self) -> &'static AdminStrings {
        match self {
            AdminLanguage::UzbekCyrillic => &ADMIN_UZBEK_CYRILLIC_STRINGS,
            AdminLanguage::Russian => &ADMIN_RUSSIAN_STRINGS,
        }
    }

    fn entries(self) -> Vec<(&'static str, &'static str)> {
        self.strings().entries()
    }

    fn native_name(self) -> &'static str {
        match self {
            AdminLanguage::UzbekCyrillic => "Ўзбекча",
            AdminLanguage::Russian => "Русский",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for AdminLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
