//! Admin area language context.
//!
//! The admin area is rendered only on the client, so there is no first-render
//! constraint: the persisted value is read when the context is created and
//! every change is written back immediately.

use super::scope::{ContextValue, Scope};
use crate::error::ContextError;
use crate::i18n::{AdminLanguage, AdminStrings, Locale};
use crate::storage::{self, KeyValueStore};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

pub struct AdminLanguageContext {
    language: RwLock<AdminLanguage>,
    store: Arc<dyn KeyValueStore>,
}

impl ContextValue for AdminLanguageContext {
    const CONSUMER: &'static str = "use_admin_language";
    const PROVIDER: &'static str = "AdminLanguageProvider";
}

impl AdminLanguageContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let language = storage::read_or_absent(store.as_ref(), AdminLanguage::STORAGE_KEY)
            .as_deref()
            .and_then(AdminLanguage::from_code)
            .unwrap_or_else(AdminLanguage::fallback);

        Self {
            language: RwLock::new(language),
            store,
        }
    }

    pub fn language(&self) -> AdminLanguage {
        *self.language.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn strings(&self) -> &'static AdminStrings {
        self.language().strings()
    }

    pub fn set_language(&self, language: AdminLanguage) {
        *self.language.write().unwrap_or_else(PoisonError::into_inner) = language;
        storage::write_or_warn(self.store.as_ref(), AdminLanguage::STORAGE_KEY, language.code());
        info!("Admin language changed to '{}'", language);
    }
}

pub fn use_admin_language(scope: &Scope) -> Result<Arc<AdminLanguageContext>, ContextError> {
    scope.consume::<AdminLanguageContext>()
}
