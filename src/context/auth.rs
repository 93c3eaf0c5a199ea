//! Admin authentication context.
//!
//! Status starts as `Loading` and settles on `Authenticated` or
//! `Unauthenticated` once the stored session token has been checked against
//! the backend. Any failure to resolve the session counts as
//! unauthenticated. Status changes are broadcast over a `watch` channel so the
//! admin layout can re-evaluate its gate.

use super::scope::{ContextValue, Scope};
use crate::api::{AdminUser, LoginResponse};
use crate::error::{ApiError, ContextError};
use crate::storage::{self, KeyValueStore};
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{info, warn};

/// Storage key of the admin session token.
pub const TOKEN_STORAGE_KEY: &str = "admin-token";

/// Backend operations the auth context depends on.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Resolve the user a token belongs to.
    async fn current_user(&self, token: &str) -> Result<AdminUser, ApiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: Option<AdminUser>,
}

#[derive(Debug, Clone)]
enum AuthState {
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

impl AuthState {
    fn status(&self) -> AuthStatus {
        match self {
            AuthState::Loading => AuthStatus::Loading,
            AuthState::Authenticated(_) => AuthStatus::Authenticated,
            AuthState::Unauthenticated => AuthStatus::Unauthenticated,
        }
    }
}

pub struct AuthContext {
    state: RwLock<AuthState>,
    status_tx: watch::Sender<AuthStatus>,
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn AuthBackend>,
}

impl ContextValue for AuthContext {
    const CONSUMER: &'static str = "use_auth";
    const PROVIDER: &'static str = "AuthProvider";
}

impl AuthContext {
    pub fn new(store: Arc<dyn KeyValueStore>, backend: Arc<dyn AuthBackend>) -> Self {
        let (status_tx, _) = watch::channel(AuthStatus::Loading);
        Self {
            state: RwLock::new(AuthState::Loading),
            status_tx,
            store,
            backend,
        }
    }

    /// Check the stored token against the backend.
    pub async fn resolve(&self) -> AuthStatus {
        self.transition(AuthState::Loading);

        let Some(token) = storage::read_or_absent(self.store.as_ref(), TOKEN_STORAGE_KEY) else {
            info!("No stored admin session");
            return self.transition(AuthState::Unauthenticated);
        };

        match self.backend.current_user(&token).await {
            Ok(user) => {
                info!("Admin session resolved for '{}'", user.username);
                self.transition(AuthState::Authenticated(Session {
                    token,
                    user: Some(user),
                }))
            }
            Err(e) => {
                warn!("Admin session could not be resolved: {}", e);
                if e.is_unauthorized() {
                    storage::remove_or_warn(self.store.as_ref(), TOKEN_STORAGE_KEY);
                }
                self.transition(AuthState::Unauthenticated)
            }
        }
    }

    /// Exchange credentials for a session token and store it.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        match self.backend.login(username, password).await {
            Ok(response) => {
                storage::write_or_warn(self.store.as_ref(), TOKEN_STORAGE_KEY, &response.token);
                info!("Admin '{}' logged in", username);
                self.transition(AuthState::Authenticated(Session {
                    token: response.token,
                    user: response.user,
                }));
                Ok(())
            }
            Err(e) => {
                warn!("Login failed for '{}': {}", username, e);
                self.transition(AuthState::Unauthenticated);
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        storage::remove_or_warn(self.store.as_ref(), TOKEN_STORAGE_KEY);
        info!("Admin logged out");
        self.transition(AuthState::Unauthenticated);
    }

    pub fn status(&self) -> AuthStatus {
        self.read_state().status()
    }

    pub fn is_loading(&self) -> bool {
        self.status() == AuthStatus::Loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.status() == AuthStatus::Authenticated
    }

    pub fn session(&self) -> Option<Session> {
        match &*self.read_state() {
            AuthState::Authenticated(session) => Some(session.clone()),
            _ => None,
        }
    }

    /// Token of the current session, for admin API calls.
    pub fn token(&self) -> Option<String> {
        self.session().map(|session| session.token)
    }

    /// Watch status changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status_tx.subscribe()
    }

    fn transition(&self, next: AuthState) -> AuthStatus {
        let status = next.status();
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
        self.status_tx.send_if_modified(|current| {
            let changed = *current != status;
            *current = status;
            changed
        });
        status
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, AuthState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn use_auth(scope: &Scope) -> Result<Arc<AuthContext>, ContextError> {
    scope.consume::<AuthContext>()
}
