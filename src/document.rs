//! Handle to the document root.
//!
//! The public language context mirrors its selection onto the root `lang`
//! attribute. Clones share the same underlying attribute.

use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
pub struct DocumentRoot {
    lang: Arc<RwLock<Option<String>>>,
}

impl DocumentRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the root `lang` attribute, if set.
    pub fn lang(&self) -> Option<String> {
        self.lang
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_lang(&self, code: &str) {
        *self.lang.write().unwrap_or_else(PoisonError::into_inner) = Some(code.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_attribute() {
        let document = DocumentRoot::new();
        let handle = document.clone();
        assert_eq!(document.lang(), None);

        handle.set_lang("uz");
        assert_eq!(document.lang().as_deref(), Some("uz"));
    }
}
