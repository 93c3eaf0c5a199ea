//! Public site language context.
//!
//! Mounting happens in two phases. The provider first renders with the
//! default language so the output matches server-rendered markup; then
//! [`LanguageContext::mount`] runs once, adopts the persisted language if it
//! is valid, and from then on every change is persisted and mirrored onto the
//! document's `lang` attribute.

use super::scope::{ContextValue, Scope};
use crate::document::DocumentRoot;
use crate::error::ContextError;
use crate::i18n::{Language, Locale, SiteStrings};
use crate::storage::{self, KeyValueStore};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy)]
struct LanguageState {
    language: Language,
    mounted: bool,
}

pub struct LanguageContext {
    state: RwLock<LanguageState>,
    store: Arc<dyn KeyValueStore>,
    document: DocumentRoot,
}

impl ContextValue for LanguageContext {
    const CONSUMER: &'static str = "use_language";
    const PROVIDER: &'static str = "LanguageProvider";
}

impl LanguageContext {
    /// Initial render state: default language, nothing read from storage.
    pub fn new(store: Arc<dyn KeyValueStore>, document: DocumentRoot) -> Self {
        Self {
            state: RwLock::new(LanguageState {
                language: Language::fallback(),
                mounted: false,
            }),
            store,
            document,
        }
    }

    /// Post-mount step. Runs once; later calls are no-ops.
    pub fn mount(&self) {
        let persisted = storage::read_or_absent(self.store.as_ref(), Language::STORAGE_KEY);

        let language = {
            let mut state = self.write_state();
            if state.mounted {
                return;
            }

            match persisted.as_deref().and_then(Language::from_code) {
                Some(language) => state.language = language,
                None => {
                    if let Some(invalid) = persisted.as_deref() {
                        debug!("Discarding invalid persisted language '{}'", invalid);
                    }
                }
            }
            state.mounted = true;
            state.language
        };

        info!("Language provider mounted with '{}'", language);
        self.on_language_changed(language);
    }

    pub fn language(&self) -> Language {
        self.read_state().language
    }

    pub fn is_mounted(&self) -> bool {
        self.read_state().mounted
    }

    /// Translation table of the current language.
    pub fn strings(&self) -> &'static SiteStrings {
        self.language().strings()
    }

    /// Update the selection. Before mount only memory changes.
    pub fn set_language(&self, language: Language) {
        let mounted = {
            let mut state = self.write_state();
            if state.language == language && state.mounted {
                return;
            }
            state.language = language;
            state.mounted
        };

        if mounted {
            info!("Public language changed to '{}'", language);
            self.on_language_changed(language);
        }
    }

    /// Change observer: persist and mirror onto the document.
    fn on_language_changed(&self, language: Language) {
        storage::write_or_warn(self.store.as_ref(), Language::STORAGE_KEY, language.code());
        self.document.set_lang(language.code());
    }

    fn read_state(&self) -> LanguageState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, LanguageState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Look up the public language context.
pub fn use_language(scope: &Scope) -> Result<Arc<LanguageContext>, ContextError> {
    scope.consume::<LanguageContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{RUSSIAN_STRINGS, UZBEK_STRINGS};
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    fn context_with(persisted: Option<&str>) -> (LanguageContext, Arc<MemoryStore>, DocumentRoot) {
        let store = Arc::new(MemoryStore::new());
        if let Some(value) = persisted {
            store.set("language", value).unwrap();
        }
        let document = DocumentRoot::new();
        let context = LanguageContext::new(store.clone(), document.clone());
        (context, store, document)
    }

    #[test]
    fn test_first_render_uses_default_even_with_persisted_value() {
        let (context, _, document) = context_with(Some("uz"));
        assert_eq!(context.language(), Language::Russian);
        assert!(!context.is_mounted());
        assert_eq!(document.lang(), None);
    }

    #[test]
    fn test_mount_adopts_valid_persisted_value() {
        let (context, _, document) = context_with(Some("uz"));
        context.mount();
        assert_eq!(context.language(), Language::Uzbek);
        assert_eq!(document.lang().as_deref(), Some("uz"));
    }

    #[test]
    fn test_mount_discards_invalid_persisted_value() {
        let (context, store, _) = context_with(Some("en"));
        context.mount();
        assert_eq!(context.language(), Language::Russian);
        assert_eq!(store.get("language").unwrap().as_deref(), Some("ru"));
    }

    #[test]
    fn test_mount_runs_once() {
        let (context, store, _) = context_with(Some("uz"));
        context.mount();
        context.set_language(Language::Russian);
        store.set("language", "uz").unwrap();

        context.mount();
        assert_eq!(context.language(), Language::Russian);
    }

    #[test]
    fn test_set_language_persists_and_mirrors_after_mount() {
        let (context, store, document) = context_with(None);
        context.mount();
        assert_eq!(context.strings().hero_title, RUSSIAN_STRINGS.hero_title);

        context.set_language(Language::Uzbek);

        assert_eq!(context.language(), Language::Uzbek);
        assert_eq!(context.strings().hero_title, UZBEK_STRINGS.hero_title);
        assert_eq!(store.get("language").unwrap().as_deref(), Some("uz"));
        assert_eq!(document.lang().as_deref(), Some("uz"));
    }

    #[test]
    fn test_set_language_before_mount_is_memory_only() {
        let (context, store, document) = context_with(None);
        context.set_language(Language::Uzbek);

        assert_eq!(context.language(), Language::Uzbek);
        assert_eq!(store.get("language").unwrap(), None);
        assert_eq!(document.lang(), None);
    }

    #[test]
    fn test_use_language_outside_provider() {
        let err = use_language(&Scope::root()).err().unwrap();
        assert!(err.to_string().contains("must be used within a LanguageProvider"));
    }

    proptest! {
        #[test]
        fn prop_mount_falls_back_for_any_invalid_value(value in "\\PC*") {
            prop_assume!(value != "ru" && value != "uz");
            let (context, _, _) = context_with(Some(&value));
            context.mount();
            prop_assert_eq!(context.language(), Language::Russian);
        }

        #[test]
        fn prop_mount_adopts_every_valid_value(index in 0usize..2) {
            let expected = Language::all()[index];
            let (context, _, document) = context_with(Some(expected.code()));
            context.mount();
            prop_assert_eq!(context.language(), expected);
            prop_assert_eq!(document.lang(), Some(expected.code().to_string()));
        }
    }
}
