//! Session Cookie Manager
//!
//! Sole owner of the two session cookies. Everything else reads and writes
//! them through [`SessionCookies`].

use axum_extra::extract::cookie::CookieJar;

use crate::application::config::AuthConfig;
use crate::domain::entity::session_credentials::SessionCredentials;

pub struct SessionCookies<'a> {
    config: &'a AuthConfig,
}

impl<'a> SessionCookies<'a> {
    pub fn new(config: &'a AuthConfig) -> Self {
        Self { config }
    }

    /// Set both cookies from a credential pair, replacing any previous pair.
    pub fn issue(&self, jar: CookieJar, credentials: &SessionCredentials) -> CookieJar {
        let policy = self.config.cookie_policy();
        jar.add(policy.build(
            &self.config.access_cookie_name,
            credentials.access(),
            self.config.access_ttl,
        ))
        .add(policy.build(
            &self.config.refresh_cookie_name,
            credentials.refresh(),
            self.config.refresh_ttl,
        ))
    }

    /// Expire both cookies.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        let policy = self.config.cookie_policy();
        jar.add(policy.expired(&self.config.access_cookie_name))
            .add(policy.expired(&self.config.refresh_cookie_name))
    }

    pub fn access(&self, jar: &CookieJar) -> Option<String> {
        read(jar, &self.config.access_cookie_name)
    }

    pub fn refresh(&self, jar: &CookieJar) -> Option<String> {
        read(jar, &self.config.refresh_cookie_name)
    }

    /// True if either session cookie is present. Says nothing about validity.
    pub fn present(&self, jar: &CookieJar) -> bool {
        self.access(jar).is_some() || self.refresh(jar).is_some()
    }
}

// An empty value counts as absent.
fn read(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
