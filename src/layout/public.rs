//! Public site layout: wraps pages in the language provider.

use crate::context::{LanguageContext, Scope};
use crate::document::DocumentRoot;
use crate::storage::KeyValueStore;
use std::sync::Arc;

pub struct PublicLayout {
    scope: Scope,
    language: Arc<LanguageContext>,
}

impl PublicLayout {
    /// First render: the language context exists but still holds the default.
    pub fn new(parent: &Scope, store: Arc<dyn KeyValueStore>, document: DocumentRoot) -> Self {
        let language = Arc::new(LanguageContext::new(store, document));
        let scope = parent.child().with(Arc::clone(&language));
        Self { scope, language }
    }

    /// Post-mount effects.
    pub fn mount(&self) {
        self.language.mount();
    }

    /// Scope handed to the pages below the layout.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn language(&self) -> &Arc<LanguageContext> {
        &self.language
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::use_language;
    use crate::i18n::Language;
    use crate::storage::MemoryStore;

    #[test]
    fn test_pages_see_the_provided_language() {
        let store = Arc::new(MemoryStore::new());
        store.set("language", "uz").unwrap();
        let layout = PublicLayout::new(&Scope::root(), store, DocumentRoot::new());

        let from_page = use_language(layout.scope()).unwrap();
        assert_eq!(from_page.language(), Language::Russian);

        layout.mount();
        assert_eq!(from_page.language(), Language::Uzbek);
    }

    #[test]
    fn test_parent_scope_is_untouched() {
        let root = Scope::root();
        let _layout = PublicLayout::new(&root, Arc::new(MemoryStore::new()), DocumentRoot::new());
        assert!(use_language(&root).is_err());
    }
}
