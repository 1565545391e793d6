//! Authenticate Use Case
//!
//! Turns an access credential into a resolved [`Identity`]. Runs on every
//! protected request; nothing about a previous verification is reused.

use std::sync::Arc;

use crate::domain::entity::identity::Identity;
use crate::domain::provider::IdentityVerifier;
use crate::domain::repository::ProfileRepository;
use crate::domain::services::resolve_role;
use crate::error::{AuthError, AuthResult};

/// Authenticate use case
pub struct AuthenticateUseCase<V, P>
where
    V: IdentityVerifier,
    P: ProfileRepository,
{
    verifier: Arc<V>,
    profiles: Arc<P>,
}

impl<V, P> AuthenticateUseCase<V, P>
where
    V: IdentityVerifier,
    P: ProfileRepository,
{
    pub fn new(verifier: Arc<V>, profiles: Arc<P>) -> Self {
        Self { verifier, profiles }
    }

    /// Verify `credential` and resolve the caller's identity.
    ///
    /// Read-only: neither cookies nor the profile store are modified.
    pub async fn execute(&self, credential: Option<&str>) -> AuthResult<Identity> {
        let credential = credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        let verified = self
            .verifier
            .verify(credential)
            .await
            .map_err(fold_into_invalid)?;

        let profile = self
            .profiles
            .find_by_subject(&verified.subject_id)
            .await
            .map_err(fold_into_invalid)?;

        let role = resolve_role(profile.as_ref());
        if profile.is_none() {
            tracing::debug!(
                subject_id = %verified.subject_id,
                "No profile yet, defaulting role"
            );
        }

        let email = verified
            .email
            .or_else(|| profile.map(|p| p.email))
            .unwrap_or_default();

        Ok(Identity::new(verified.subject_id, email, role))
    }
}

/// Callers must not learn whether the provider was down or the credential
/// was bad; the detail goes to the log only.
fn fold_into_invalid(err: AuthError) -> AuthError {
    match err {
        AuthError::InvalidCredential => AuthError::InvalidCredential,
        other => {
            tracing::error!(error = %other, "Authentication failed on upstream error");
            AuthError::InvalidCredential
        }
    }
}
