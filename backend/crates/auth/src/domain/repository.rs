//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user_profile::UserProfile;
use crate::domain::value_object::{SubjectId, user_role::UserRole};
use crate::error::AuthResult;

/// Counts reported on the admin stats endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileCounts {
    pub total: u64,
    pub admins: u64,
}

/// User profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Find a profile by subject
    async fn find_by_subject(&self, subject_id: &SubjectId) -> AuthResult<Option<UserProfile>>;

    /// Insert unless a profile for the subject already exists.
    ///
    /// Returns `true` if this call created the record. Concurrent callers for
    /// the same subject must see exactly one `true`; the store enforces this.
    async fn create_if_absent(&self, profile: &UserProfile) -> AuthResult<bool>;

    /// Replace the stored role. Returns the updated profile, or `None` if the
    /// subject has no profile.
    async fn update_role(
        &self,
        subject_id: &SubjectId,
        role: UserRole,
    ) -> AuthResult<Option<UserProfile>>;

    /// Count profiles
    async fn counts(&self) -> AuthResult<ProfileCounts>;
}
