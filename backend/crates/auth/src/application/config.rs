//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::str::FromStr;
use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;
use platform::cookie::CookiePolicy;

/// Where the Authentication Guard looks for the access credential.
///
/// A deployment picks exactly one; the two are never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenSource {
    /// `access_token` cookie
    #[default]
    Cookie,
    /// `Authorization: Bearer <credential>` header
    BearerHeader,
}

impl FromStr for TokenSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cookie" => Ok(TokenSource::Cookie),
            "bearer" | "header" => Ok(TokenSource::BearerHeader),
            other => Err(format!("unknown token source: {other}")),
        }
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Access credential cookie name
    pub access_cookie_name: String,
    /// Refresh credential cookie name
    pub refresh_cookie_name: String,
    /// Access cookie lifetime (1 hour)
    pub access_ttl: Duration,
    /// Refresh cookie lifetime (14 days)
    pub refresh_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Access credential extraction strategy
    pub token_source: TokenSource,
    /// Path prefixes that require a session cookie at the edge
    pub protected_prefixes: Vec<String>,
    /// Login entry point for redirects
    pub login_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "access_token".to_string(),
            refresh_cookie_name: "refresh_token".to_string(),
            access_ttl: Duration::from_secs(3600),
            refresh_ttl: Duration::from_secs(14 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            token_source: TokenSource::Cookie,
            protected_prefixes: vec!["/dashboard".to_string(), "/admin".to_string()],
            login_path: "/login".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Cookie attributes shared by both session cookies
    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy {
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }

    /// True when `path` falls under a protected prefix.
    ///
    /// Prefixes match on segment boundaries: `/admin` covers `/admin` and
    /// `/admin/stats` but not `/administrator`.
    pub fn is_protected_path(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}
