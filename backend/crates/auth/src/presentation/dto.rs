//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::Identity;
use crate::domain::repository::ProfileCounts;
use crate::domain::value_object::user_role::UserRole;

// ============================================================================
// Session
// ============================================================================

/// Login request: credentials obtained by the browser from the provider
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub id_token: String,
    pub refresh_token: String,
}

/// `{status}` body returned by the session endpoints
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub const fn new(status: &'static str) -> Self {
        Self { status }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// `{user:{uid,email,role}}`
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user: Identity,
}

/// Profile initialization response; identical on every call
#[derive(Debug, Clone, Serialize)]
pub struct CreateProfileResponse {
    pub status: &'static str,
    pub message: &'static str,
}

// ============================================================================
// Admin
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_users: u64,
    pub admin_users: u64,
}

impl From<ProfileCounts> for StatsResponse {
    fn from(counts: ProfileCounts) -> Self {
        Self {
            total_users: counts.total,
            admin_users: counts.admins,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: UserRole,
}
