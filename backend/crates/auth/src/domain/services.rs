//! Domain Services
//!
//! Pure rules shared by every caller: role resolution and role checks.

use crate::domain::entity::user_profile::UserProfile;
use crate::domain::value_object::{required_roles::RequiredRoles, user_role::UserRole};

/// Resolve the effective role of a subject.
///
/// Total: a stored profile yields its role, a missing profile yields
/// [`UserRole::User`]. A missing profile is expected in the window between
/// signup and lazy profile creation.
pub fn resolve_role(profile: Option<&UserProfile>) -> UserRole {
    profile.map(|p| p.role).unwrap_or_default()
}

/// True when `role` satisfies `required`.
pub fn role_satisfies(role: UserRole, required: &RequiredRoles) -> bool {
    required.contains(role)
}
