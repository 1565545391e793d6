//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Every authentication failure maps to 401, every authorization failure
//! to 403. Upstream failures are 503 unless a guard folds them into 401.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No access credential on the request
    #[error("No token provided")]
    MissingCredential,

    /// Access credential rejected by the verifier
    #[error("Invalid or expired token")]
    InvalidCredential,

    /// Authorization ran without a resolved identity
    #[error("Authentication required")]
    AuthenticationRequired,

    /// No refresh credential on the refresh call
    #[error("No refresh token")]
    MissingRefreshCredential,

    /// Provider refused the refresh exchange (expired, revoked, rotated)
    #[error("Refresh failed")]
    RefreshRejected,

    /// Provider unreachable during refresh; the credential may still be valid
    #[error("Refresh temporarily unavailable")]
    RefreshUnavailable,

    /// Identity lacks the required role
    #[error("Insufficient permissions")]
    Forbidden,

    /// No profile stored for the subject
    #[error("User profile not found")]
    ProfileNotFound,

    /// Malformed request input
    #[error("{0}")]
    BadRequest(String),

    /// Identity provider or profile store unreachable or misbehaving
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredential
            | AuthError::InvalidCredential
            | AuthError::AuthenticationRequired
            | AuthError::MissingRefreshCredential
            | AuthError::RefreshRejected
            | AuthError::RefreshUnavailable => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::ProfileNotFound => ErrorKind::NotFound,
            AuthError::BadRequest(_) => ErrorKind::BadRequest,
            AuthError::Upstream(_) => ErrorKind::ServiceUnavailable,
            AuthError::Database(e) => classify_sqlx(e).0,
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// True for every 401 variant
    pub fn is_unauthenticated(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// True for failures of an external dependency
    pub fn is_upstream(&self) -> bool {
        matches!(self, AuthError::Upstream(_) | AuthError::Database(_))
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            err if err.is_unauthenticated() => {
                AppError::unauthorized(err.to_string()).with_action("Sign in again")
            }
            // Upstream details stay in the logs.
            AuthError::Upstream(_) => {
                AppError::service_unavailable("Service temporarily unavailable")
            }
            AuthError::Internal(_) => AppError::internal("Internal error"),
            err => AppError::new(err.kind(), err.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Auth upstream failure");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::RefreshRejected => {
                tracing::warn!("Refresh credential rejected");
            }
            AuthError::Forbidden => {
                tracing::warn!("Request denied: insufficient role");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<kernel::id::IdError> for AuthError {
    fn from(err: kernel::id::IdError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}

impl From<crate::domain::entity::session_credentials::CredentialsError> for AuthError {
    fn from(err: crate::domain::entity::session_credentials::CredentialsError) -> Self {
        AuthError::BadRequest(err.to_string())
    }
}
