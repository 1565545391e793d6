//! Session Credentials
//!
//! A browser session is nothing but an access/refresh credential pair held
//! in cookies. The pair is immutable: rotation produces a new value that
//! replaces the old one as a whole.

use std::fmt;

/// Access/refresh credential pair
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    access: String,
    refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("access credential is empty")]
    EmptyAccess,
    #[error("refresh credential is empty")]
    EmptyRefresh,
}

impl SessionCredentials {
    pub fn new(
        access: impl Into<String>,
        refresh: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let access = access.into();
        let refresh = refresh.into();
        if access.trim().is_empty() {
            return Err(CredentialsError::EmptyAccess);
        }
        if refresh.trim().is_empty() {
            return Err(CredentialsError::EmptyRefresh);
        }
        Ok(Self { access, refresh })
    }

    pub fn access(&self) -> &str {
        &self.access
    }

    pub fn refresh(&self) -> &str {
        &self.refresh
    }
}

// Credentials must never end up in logs.
impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish()
    }
}
