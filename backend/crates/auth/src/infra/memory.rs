//! In-Memory Repository Implementation
//!
//! Same semantics as the Postgres store. Used when no database is
//! configured and by tests.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tokio::sync::RwLock;

use crate::domain::entity::user_profile::UserProfile;
use crate::domain::repository::{ProfileCounts, ProfileRepository};
use crate::domain::value_object::{SubjectId, user_role::UserRole};
use crate::error::AuthResult;

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<SubjectId, UserProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile, replacing any existing one.
    pub async fn insert(&self, profile: UserProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.subject_id.clone(), profile);
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_subject(&self, subject_id: &SubjectId) -> AuthResult<Option<UserProfile>> {
        Ok(self.profiles.read().await.get(subject_id).cloned())
    }

    async fn create_if_absent(&self, profile: &UserProfile) -> AuthResult<bool> {
        match self.profiles.write().await.entry(profile.subject_id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(true)
            }
        }
    }

    async fn update_role(
        &self,
        subject_id: &SubjectId,
        role: UserRole,
    ) -> AuthResult<Option<UserProfile>> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(subject_id).map(|profile| {
            profile.role = role;
            profile.clone()
        }))
    }

    async fn counts(&self) -> AuthResult<ProfileCounts> {
        let profiles = self.profiles.read().await;
        Ok(ProfileCounts {
            total: profiles.len() as u64,
            admins: profiles.values().filter(|p| p.role.is_admin()).count() as u64,
        })
    }
}
