//! Cookie Management Infrastructure
//!
//! A [`CookiePolicy`] captures the attributes shared by every cookie a
//! service issues, and produces `axum_extra` cookies from it.

use std::time::Duration;

use axum_extra::extract::cookie::{Cookie, SameSite as CookieSameSite};
use ::cookie::time::{self, OffsetDateTime};

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl From<SameSite> for CookieSameSite {
    fn from(value: SameSite) -> Self {
        match value {
            SameSite::Strict => CookieSameSite::Strict,
            SameSite::Lax => CookieSameSite::Lax,
            SameSite::None => CookieSameSite::None,
        }
    }
}

/// Attributes applied to every issued cookie.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookiePolicy {
    /// Build a cookie that lives for `ttl`.
    pub fn build(&self, name: &str, value: &str, ttl: Duration) -> Cookie<'static> {
        Cookie::build((name.to_string(), value.to_string()))
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site.into())
            .path(self.path.clone())
            .max_age(to_cookie_duration(ttl))
            .build()
    }

    /// Build an already-expired cookie that makes the browser drop `name`.
    ///
    /// Path must match the issued cookie or the browser keeps the original.
    pub fn expired(&self, name: &str) -> Cookie<'static> {
        Cookie::build((name.to_string(), String::new()))
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site.into())
            .path(self.path.clone())
            .max_age(time::Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build()
    }
}

fn to_cookie_duration(ttl: Duration) -> time::Duration {
    time::Duration::seconds(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX))
}
