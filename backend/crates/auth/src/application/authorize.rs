//! Authorize
//!
//! Role gate evaluated after authentication. Never verifies credentials.

use crate::domain::entity::identity::Identity;
use crate::domain::services::role_satisfies;
use crate::domain::value_object::required_roles::RequiredRoles;
use crate::error::{AuthError, AuthResult};

/// Check that a resolved identity holds one of the `required` roles.
pub fn authorize(identity: Option<&Identity>, required: &RequiredRoles) -> AuthResult<()> {
    let identity = identity.ok_or(AuthError::AuthenticationRequired)?;

    if !role_satisfies(identity.role, required) {
        tracing::info!(
            subject_id = %identity.subject_id,
            role = %identity.role,
            required = %required,
            "Role check failed"
        );
        return Err(AuthError::Forbidden);
    }

    Ok(())
}
