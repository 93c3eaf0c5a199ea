//! Admin area layout.
//!
//! Providers are nested Auth, then WebSocket, then AdminLanguage, so every
//! admin page can reach all three. Rendering is gated on auth status: the
//! login route renders without a session, other routes show a loading frame
//! while the session resolves, the protected shell once authenticated, and
//! otherwise redirect to the login route. The redirect is issued once per
//! change of status or route, never on every render.

use crate::config::Config;
use crate::context::{
    AdminLanguageContext, AuthBackend, AuthContext, AuthStatus, Scope, WebSocketContext,
};
use crate::i18n::AdminLanguage;
use crate::router::Navigator;
use crate::storage::KeyValueStore;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

pub const DEFAULT_LOGIN_ROUTE: &str = "/admin/login";
pub const DASHBOARD_ROUTE: &str = "/admin";
pub const PROJECTS_ROUTE: &str = "/admin/projects";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: &'static str,
    pub active: bool,
}

/// The authenticated frame: sidebar navigation around the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub route: String,
    pub language: AdminLanguage,
    pub nav: Vec<NavItem>,
    pub logout_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminFrame {
    /// The login page, rendered without the shell.
    Login,
    Loading { label: &'static str },
    Redirecting { to: String },
    Shell(ShellView),
}

impl AdminFrame {
    pub fn is_shell(&self) -> bool {
        matches!(self, AdminFrame::Shell(_))
    }
}

pub struct AdminLayout {
    scope: Scope,
    auth: Arc<AuthContext>,
    websocket: Arc<WebSocketContext>,
    language: Arc<AdminLanguageContext>,
    navigator: Arc<dyn Navigator>,
    login_route: String,
    // (status, route) seen by the last gate evaluation
    last_gate: Mutex<Option<(AuthStatus, String)>>,
}

impl AdminLayout {
    pub fn new(
        parent: &Scope,
        auth: Arc<AuthContext>,
        websocket: Arc<WebSocketContext>,
        language: Arc<AdminLanguageContext>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let scope = parent
            .child()
            .with(Arc::clone(&auth))
            .child()
            .with(Arc::clone(&websocket))
            .child()
            .with(Arc::clone(&language));

        Self {
            scope,
            auth,
            websocket,
            language,
            navigator,
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            last_gate: Mutex::new(None),
        }
    }

    /// Build the providers from configuration.
    pub fn from_config(
        parent: &Scope,
        config: &Config,
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn AuthBackend>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let auth = Arc::new(AuthContext::new(Arc::clone(&store), backend));
        let websocket = Arc::new(
            WebSocketContext::new(config.ws_url.clone())
                .with_connect_timeout(config.ws_connect_timeout()),
        );
        let language = Arc::new(AdminLanguageContext::new(store));
        Self::new(parent, auth, websocket, language, navigator)
            .with_login_route(config.admin_login_route.clone())
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    /// Open the live-update connection for the lifetime of the layout.
    ///
    /// A failed connection is logged; the admin area still renders.
    pub async fn mount(&self) {
        if let Err(e) = self.websocket.connect().await {
            warn!("Admin live updates unavailable: {}", e);
        }
    }

    /// Resolve the stored session.
    pub async fn resolve_session(&self) -> AuthStatus {
        self.auth.resolve().await
    }

    /// Release the live-update connection.
    pub async fn unmount(&self) {
        self.websocket.close().await;
    }

    /// Scope handed to admin pages.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    pub fn websocket(&self) -> &Arc<WebSocketContext> {
        &self.websocket
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn render(&self) -> AdminFrame {
        let route = self.navigator.current_route();
        let status = self.auth.status();
        self.run_gate(status, &route);

        if self.is_login_route(&route) {
            return AdminFrame::Login;
        }

        match status {
            AuthStatus::Loading => AdminFrame::Loading {
                label: self.language.strings().loading,
            },
            AuthStatus::Unauthenticated => AdminFrame::Redirecting {
                to: self.login_route.clone(),
            },
            AuthStatus::Authenticated => AdminFrame::Shell(self.shell(route)),
        }
    }

    /// Wait until the session is no longer loading, then render.
    pub async fn render_when_settled(&self) -> AdminFrame {
        let mut status = self.auth.subscribe();
        if let Err(e) = status.wait_for(|s| *s != AuthStatus::Loading).await {
            warn!("Auth status channel closed: {}", e);
        }
        self.render()
    }

    /// Log out and let the gate send the user to the login route.
    pub fn logout(&self) -> AdminFrame {
        self.auth.logout();
        self.render()
    }

    fn run_gate(&self, status: AuthStatus, route: &str) {
        let mut last = self.last_gate.lock().unwrap_or_else(PoisonError::into_inner);
        let unchanged = last
            .as_ref()
            .is_some_and(|(s, r)| *s == status && r == route);
        if unchanged {
            return;
        }
        *last = Some((status, route.to_string()));

        if status == AuthStatus::Unauthenticated && !self.is_login_route(route) {
            info!("Unauthenticated access to {}, redirecting to {}", route, self.login_route);
            self.navigator.replace(&self.login_route);
        }
    }

    fn is_login_route(&self, route: &str) -> bool {
        route.trim_end_matches('/') == self.login_route.trim_end_matches('/')
    }

    fn shell(&self, route: String) -> ShellView {
        let strings = self.language.strings();
        let nav = [
            (strings.nav_dashboard, DASHBOARD_ROUTE),
            (strings.nav_projects, PROJECTS_ROUTE),
        ]
        .into_iter()
        .map(|(label, target)| NavItem {
            label,
            route: target,
            active: is_active(&route, target),
        })
        .collect();

        ShellView {
            route,
            language: self.language.language(),
            nav,
            logout_label: strings.nav_logout,
        }
    }
}

/// The dashboard is active only on its own route; sections also match
/// their sub-routes.
fn is_active(route: &str, target: &str) -> bool {
    if target == DASHBOARD_ROUTE {
        return route.trim_end_matches('/') == DASHBOARD_ROUTE;
    }
    route == target || route.starts_with(&format!("{}/", target))
}
