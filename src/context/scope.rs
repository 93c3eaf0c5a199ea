//! Typed provider scope.
//!
//! Layouts register their contexts in a [`Scope`]; everything rendered below
//! the layout receives a child scope and looks contexts up by type. A lookup
//! that finds no provider on the chain is a configuration error.

use crate::error::ContextError;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// A value that can be provided through a [`Scope`].
pub trait ContextValue: Any + Send + Sync {
    /// Name of the consumer hook, used in the configuration error.
    const CONSUMER: &'static str;

    /// Name of the provider that must wrap consumers.
    const PROVIDER: &'static str;
}

type Entry = Arc<dyn Any + Send + Sync>;

/// One level of the provider tree.
#[derive(Clone, Default)]
pub struct Scope {
    values: HashMap<TypeId, Entry>,
    parent: Option<Arc<Scope>>,
}

impl Scope {
    /// An empty root scope with no providers.
    pub fn root() -> Self {
        Self::default()
    }

    /// A scope nested below this one. Values provided to the child shadow the
    /// parent's; the parent is unaffected.
    pub fn child(&self) -> Self {
        Self {
            values: HashMap::new(),
            parent: Some(Arc::new(self.clone())),
        }
    }

    pub fn provide<T: ContextValue>(&mut self, value: Arc<T>) {
        self.values.insert(TypeId::of::<T>(), value);
    }

    /// Builder form of [`Scope::provide`].
    pub fn with<T: ContextValue>(mut self, value: Arc<T>) -> Self {
        self.provide(value);
        self
    }

    /// Look up the nearest provided `T`.
    pub fn consume<T: ContextValue>(&self) -> Result<Arc<T>, ContextError> {
        self.find::<T>().ok_or(ContextError::MissingProvider {
            consumer: T::CONSUMER,
            provider: T::PROVIDER,
        })
    }

    fn find<T: ContextValue>(&self) -> Option<Arc<T>> {
        if let Some(entry) = self.values.get(&TypeId::of::<T>()) {
            return entry.clone().downcast::<T>().ok();
        }
        self.parent.as_ref().and_then(|parent| parent.find::<T>())
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("values", &self.values.len())
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
