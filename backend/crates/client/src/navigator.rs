//! Navigator
//!
//! The interceptor needs two things from its host: where the user currently
//! is, and a way to send them to the login page.

use std::sync::{PoisonError, RwLock};

pub trait Navigator: Send + Sync {
    /// Path of the page currently shown
    fn current_path(&self) -> String;

    /// Leave the current page for `path`
    fn redirect_to(&self, path: &str);
}

/// Navigator for hosts without a page model. Records redirects.
#[derive(Debug)]
pub struct HeadlessNavigator {
    current: RwLock<String>,
    redirects: RwLock<Vec<String>>,
}

impl HeadlessNavigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(initial_path.into()),
            redirects: RwLock::new(Vec::new()),
        }
    }

    /// Simulate user navigation.
    pub fn navigate(&self, path: impl Into<String>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = path.into();
    }

    /// Redirects issued so far, oldest first
    pub fn redirects(&self) -> Vec<String> {
        self.redirects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for HeadlessNavigator {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for HeadlessNavigator {
    fn current_path(&self) -> String {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn redirect_to(&self, path: &str) {
        tracing::info!(path, "Redirecting");
        self.redirects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
        self.navigate(path);
    }
}
