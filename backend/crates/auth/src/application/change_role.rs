//! Change Role Use Case
//!
//! Administrative role assignment. The only path by which a profile's
//! role moves away from the default.

use std::sync::Arc;

use crate::domain::entity::{identity::Identity, user_profile::UserProfile};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::{SubjectId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Change role input
pub struct ChangeRoleInput {
    pub target: SubjectId,
    pub role: UserRole,
}

/// Change role use case
pub struct ChangeRoleUseCase<P>
where
    P: ProfileRepository,
{
    profiles: Arc<P>,
}

impl<P> ChangeRoleUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }

    pub async fn execute(
        &self,
        actor: &Identity,
        input: ChangeRoleInput,
    ) -> AuthResult<UserProfile> {
        let updated = self
            .profiles
            .update_role(&input.target, input.role)
            .await?
            .ok_or(AuthError::ProfileNotFound)?;

        tracing::info!(
            actor = %actor.subject_id,
            target = %updated.subject_id,
            role = %updated.role,
            "Role changed"
        );

        Ok(updated)
    }
}
