//! Identity Provider Ports
//!
//! The identity provider is an external collaborator. These traits are the
//! only contract the rest of the crate relies on; infrastructure supplies
//! the HTTP implementations.

use serde_json::{Map, Value};

use crate::domain::entity::session_credentials::SessionCredentials;
use crate::domain::value_object::SubjectId;
use crate::error::AuthResult;

/// Output of a successful credential verification
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub subject_id: SubjectId,
    pub email: Option<String>,
    /// Raw provider claims, passed through untouched
    pub claims: Map<String, Value>,
}

/// Verifies an opaque access credential.
///
/// Implementations fail with [`crate::error::AuthError::InvalidCredential`]
/// when the provider rejects the credential and with
/// [`crate::error::AuthError::Upstream`] when the provider cannot answer.
#[trait_variant::make(IdentityVerifier: Send)]
pub trait LocalIdentityVerifier {
    async fn verify(&self, credential: &str) -> AuthResult<VerifiedToken>;
}

/// Exchanges a refresh credential for a rotated credential pair.
///
/// A stale (already rotated) or revoked refresh credential must fail with
/// [`crate::error::AuthError::RefreshRejected`]; it must never succeed twice.
#[trait_variant::make(TokenIssuer: Send)]
pub trait LocalTokenIssuer {
    async fn exchange_refresh(&self, refresh_credential: &str) -> AuthResult<SessionCredentials>;
}
