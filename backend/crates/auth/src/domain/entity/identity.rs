//! Identity
//!
//! The server-resolved identity attached to a request after the
//! Authentication Guard succeeds. Recomputed on every request and never
//! written to the session cookies.

use serde::Serialize;

use crate::domain::value_object::{SubjectId, user_role::UserRole};

/// Resolved identity of the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    #[serde(rename = "uid")]
    pub subject_id: SubjectId,
    pub email: String,
    pub role: UserRole,
}

impl Identity {
    pub fn new(subject_id: SubjectId, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            subject_id,
            email: email.into(),
            role,
        }
    }
}
