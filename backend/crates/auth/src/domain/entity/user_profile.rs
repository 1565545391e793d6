//! User Profile Entity
//!
//! Persisted record holding the role of a subject. Created lazily on the
//! first authenticated request after signup; never deleted here.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{SubjectId, user_role::UserRole};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub subject_id: SubjectId,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// New profile with the default role.
    pub fn new(subject_id: SubjectId, email: impl Into<String>) -> Self {
        Self {
            subject_id,
            email: email.into(),
            role: UserRole::default(),
            created_at: Utc::now(),
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}
