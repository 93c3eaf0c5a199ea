//! Internationalization for the public site and the admin area.
//!
//! # Architecture
//!
//! - `language`: the two language sets (`Language`, `AdminLanguage`) and the
//!   `Locale` trait tying each value to its code, storage key and table
//! - `strings`: public site translation tables (Russian, Uzbek)
//! - `admin_strings`: admin translation tables (Uzbek Cyrillic, Russian)
//! - `validator`: table parity and placeholder checks
//!
//! Tables are `const` data and are never mutated at runtime. The selected
//! language lives in the contexts under `crate::context`.
//!
//! # Example
//!
//! ```rust
//! use estate_portal::i18n::{Language, Locale};
//!
//! let lang = Language::from_code("uz").unwrap_or_else(Language::fallback);
//! assert_eq!(lang.strings().nav_contact, "Aloqa");
//! ```

mod admin_strings;
mod language;
mod strings;
mod validator;

pub use admin_strings::{AdminStrings, ADMIN_RUSSIAN_STRINGS, ADMIN_UZBEK_CYRILLIC_STRINGS};
pub use language::{AdminLanguage, Language, Locale};
pub use strings::{format_template, SiteStrings, RUSSIAN_STRINGS, UZBEK_STRINGS};
pub use validator::{TableValidator, ValidationReport};
