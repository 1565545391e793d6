//! Ensure Profile Use Case
//!
//! Creates the caller's profile on first call with the default role.
//! Repeated or concurrent calls never overwrite an existing record.

use std::sync::Arc;

use crate::domain::entity::{identity::Identity, user_profile::UserProfile};
use crate::domain::repository::ProfileRepository;
use crate::error::AuthResult;

/// Ensure profile use case
pub struct EnsureProfileUseCase<P>
where
    P: ProfileRepository,
{
    profiles: Arc<P>,
}

impl<P> EnsureProfileUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    /// Returns `true` if this call created the profile.
    pub async fn execute(&self, identity: &Identity) -> AuthResult<bool> {
        let profile = UserProfile::new(identity.subject_id.clone(), identity.email.clone());
        let created = self.profiles.create_if_absent(&profile).await?;

        if created {
            tracing::info!(subject_id = %identity.subject_id, "Profile created");
        } else {
            tracing::debug!(subject_id = %identity.subject_id, "Profile already exists");
        }

        Ok(created)
    }
}
