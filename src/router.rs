//! Client-side navigation.
//!
//! The admin layout reads the current route and issues redirects through
//! [`Navigator`]. [`MemoryRouter`] keeps the route in memory and records
//! every redirect it was asked to perform.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::debug;

pub trait Navigator: Send + Sync {
    fn current_route(&self) -> String;

    /// Replace the current route without adding a history entry.
    fn replace(&self, route: &str);
}

#[derive(Debug)]
pub struct MemoryRouter {
    route: watch::Sender<String>,
    redirects: Mutex<Vec<String>>,
}

impl MemoryRouter {
    pub fn new(initial_route: impl Into<String>) -> Self {
        let (route, _) = watch::channel(initial_route.into());
        Self {
            route,
            redirects: Mutex::new(Vec::new()),
        }
    }

    /// User-driven navigation (link click), as opposed to a redirect.
    pub fn navigate(&self, route: &str) {
        debug!("Navigating to {}", route);
        self.route.send_replace(route.to_string());
    }

    /// Every route passed to [`Navigator::replace`], in order.
    pub fn redirects(&self) -> Vec<String> {
        self.redirect_log().clone()
    }

    /// Watch route changes.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.route.subscribe()
    }

    fn redirect_log(&self) -> MutexGuard<'_, Vec<String>> {
        self.redirects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for MemoryRouter {
    fn current_route(&self) -> String {
        self.route.borrow().clone()
    }

    fn replace(&self, route: &str) {
        debug!("Redirecting to {}", route);
        self.redirect_log().push(route.to_string());
        self.route.send_replace(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_changes_route_without_recording_redirect() {
        let router = MemoryRouter::new("/admin");
        router.navigate("/admin/projects");

        assert_eq!(router.current_route(), "/admin/projects");
        assert!(router.redirects().is_empty());
    }

    #[test]
    fn test_replace_records_redirect() {
        let router = MemoryRouter::new("/admin/projects");
        router.replace("/admin/login");

        assert_eq!(router.current_route(), "/admin/login");
        assert_eq!(router.redirects(), vec!["/admin/login".to_string()]);
    }

    #[test]
    fn test_subscribe_sees_latest_route() {
        let router = MemoryRouter::new("/admin");
        let rx = router.subscribe();
        router.navigate("/admin/projects/7");
        assert_eq!(*rx.borrow(), "/admin/projects/7");
    }
}
