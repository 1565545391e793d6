//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::user_profile::UserProfile;
use crate::domain::repository::{ProfileCounts, ProfileRepository};
use crate::domain::value_object::{SubjectId, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileRepository for PgProfileRepository {
    async fn find_by_subject(&self, subject_id: &SubjectId) -> AuthResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                subject_id,
                email,
                role,
                created_at
            FROM user_profiles
            WHERE subject_id = $1
            "#,
        )
        .bind(subject_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProfileRow::into_profile).transpose()
    }

    async fn create_if_absent(&self, profile: &UserProfile) -> AuthResult<bool> {
        // The primary key decides concurrent first requests.
        let inserted = sqlx::query(
            r#"
            INSERT INTO user_profiles (
                subject_id,
                email,
                role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (subject_id) DO NOTHING
            "#,
        )
        .bind(profile.subject_id.as_str())
        .bind(&profile.email)
        .bind(profile.role.code())
        .bind(profile.created_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    async fn update_role(
        &self,
        subject_id: &SubjectId,
        role: UserRole,
    ) -> AuthResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            UPDATE user_profiles
            SET role = $2, updated_at = NOW()
            WHERE subject_id = $1
            RETURNING subject_id, email, role, created_at
            "#,
        )
        .bind(subject_id.as_str())
        .bind(role.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProfileRow::into_profile).transpose()
    }

    async fn counts(&self) -> AuthResult<ProfileCounts> {
        let (total, admins): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE role = 'admin')
            FROM user_profiles
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ProfileCounts {
            total: u64::try_from(total).unwrap_or_default(),
            admins: u64::try_from(admins).unwrap_or_default(),
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProfileRow {
    subject_id: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> AuthResult<UserProfile> {
        let subject_id = SubjectId::parse(&self.subject_id)
            .map_err(|e| AuthError::Internal(format!("Invalid subject_id: {}", e)))?;

        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role: {}", self.role)))?;

        Ok(UserProfile {
            subject_id,
            email: self.email,
            role,
            created_at: self.created_at,
        })
    }
}
