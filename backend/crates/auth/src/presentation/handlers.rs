//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangeRoleInput, ChangeRoleUseCase, EnsureProfileUseCase, ProfileStatsUseCase, RefreshGate,
    RefreshSessionUseCase,
};
use crate::domain::entity::{identity::Identity, session_credentials::SessionCredentials};
use crate::domain::provider::{IdentityVerifier, TokenIssuer};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::SubjectId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangeRoleRequest, CreateProfileResponse, LoginRequest, ProfileResponse, StatsResponse,
    StatusResponse,
};
use crate::presentation::middleware::CurrentIdentity;
use crate::presentation::session_cookie::SessionCookies;

/// Shared state for auth handlers
pub struct AuthAppState<P, V, I> {
    pub profiles: Arc<P>,
    pub verifier: Arc<V>,
    pub issuer: Arc<I>,
    pub refresh_gate: Arc<RefreshGate>,
    pub config: Arc<AuthConfig>,
}

impl<P, V, I> AuthAppState<P, V, I> {
    pub fn new(profiles: Arc<P>, verifier: Arc<V>, issuer: Arc<I>, config: AuthConfig) -> Self {
        Self {
            profiles,
            verifier,
            issuer,
            refresh_gate: Arc::new(RefreshGate::new()),
            config: Arc::new(config),
        }
    }
}

// Manual impl: the ports themselves need not be Clone.
impl<P, V, I> Clone for AuthAppState<P, V, I> {
    fn clone(&self) -> Self {
        Self {
            profiles: self.profiles.clone(),
            verifier: self.verifier.clone(),
            issuer: self.issuer.clone(),
            refresh_gate: self.refresh_gate.clone(),
            config: self.config.clone(),
        }
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AuthError::BadRequest(rejection.body_text()))
}

// ============================================================================
// Session
// ============================================================================

/// POST /api/auth/login
///
/// Stores the provider-issued credential pair as session cookies. The access
/// credential is verified on first use, not here.
pub async fn login<P, V, I>(
    State(state): State<AuthAppState<P, V, I>>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<(CookieJar, Json<StatusResponse>)>
where
    P: ProfileRepository + Sync + 'static,
    V: IdentityVerifier + Sync + 'static,
    I: TokenIssuer + Sync + 'static,
{
    let req = json_body(payload)?;
    let credentials = SessionCredentials::new(req.id_token, req.refresh_token)?;

    let jar = SessionCookies::new(&state.config).issue(jar, &credentials);
    tracing::info!("Session established");

    Ok((jar, Json(StatusResponse::new("success"))))
}

/// POST /api/auth/refresh
pub async fn refresh<P, V, I>(
    State(state): State<AuthAppState<P, V, I>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<StatusResponse>), (CookieJar, AuthError)>
where
    P: ProfileRepository + Sync + 'static,
    V: IdentityVerifier + Sync + 'static,
    I: TokenIssuer + Sync + 'static,
{
    let cookies = SessionCookies::new(&state.config);
    let refresh_credential = cookies.refresh(&jar);

    let use_case =
        RefreshSessionUseCase::new(state.issuer.clone(), state.refresh_gate.clone());

    match use_case.execute(refresh_credential.as_deref()).await {
        Ok(credentials) => Ok((
            cookies.issue(jar, &credentials),
            Json(StatusResponse::new("refreshed")),
        )),
        // The session is dead; drop what the browser still holds.
        Err(err @ AuthError::RefreshRejected) => Err((cookies.clear(jar), err)),
        Err(err) => Err((jar, err)),
    }
}

/// POST /api/auth/logout
pub async fn logout<P, V, I>(
    State(state): State<AuthAppState<P, V, I>>,
    jar: CookieJar,
) -> (CookieJar, Json<StatusResponse>)
where
    P: ProfileRepository + Sync + 'static,
    V: IdentityVerifier + Sync + 'static,
    I: TokenIssuer + Sync + 'static,
{
    let jar = SessionCookies::new(&state.config).clear(jar);
    tracing::info!("Session cleared");
    (jar, Json(StatusResponse::new("logged out")))
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/profile
pub async fn profile(CurrentIdentity(identity): CurrentIdentity) -> Json<ProfileResponse> {
    Json(ProfileResponse { user: identity })
}

/// POST /api/users
///
/// Same response whether or not this call created the profile.
pub async fn create_profile<P, V, I>(
    State(state): State<AuthAppState<P, V, I>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> AuthResult<Json<CreateProfileResponse>>
where
    P: ProfileRepository + Sync + 'static,
    V: IdentityVerifier + Sync + 'static,
    I: TokenIssuer + Sync + 'static,
{
    EnsureProfileUseCase::new(state.profiles.clone())
        .execute(&identity)
        .await?;

    Ok(Json(CreateProfileResponse {
        status: "success",
        message: "Profile initialized",
    }))
}

// ============================================================================
// Admin (requires admin role)
// ============================================================================

/// GET /api/admin/stats
pub async fn admin_stats<P, V, I>(
    State(state): State<AuthAppState<P, V, I>>,
) -> AuthResult<Json<StatsResponse>>
where
    P: ProfileRepository + Sync + 'static,
    V: IdentityVerifier + Sync + 'static,
    I: TokenIssuer + Sync + 'static,
{
    let counts = ProfileStatsUseCase::new(state.profiles.clone())
        .execute()
        .await?;
    Ok(Json(counts.into()))
}

/// PUT /api/admin/users/{uid}/role
pub async fn change_role<P, V, I>(
    State(state): State<AuthAppState<P, V, I>>,
    CurrentIdentity(actor): CurrentIdentity,
    Path(uid): Path<String>,
    payload: Result<Json<ChangeRoleRequest>, JsonRejection>,
) -> AuthResult<Json<ProfileResponse>>
where
    P: ProfileRepository + Sync + 'static,
    V: IdentityVerifier + Sync + 'static,
    I: TokenIssuer + Sync + 'static,
{
    let req = json_body(payload)?;
    let input = ChangeRoleInput {
        target: SubjectId::parse(&uid)?,
        role: req.role,
    };

    let updated = ChangeRoleUseCase::new(state.profiles.clone())
        .execute(&actor, input)
        .await?;

    Ok(Json(ProfileResponse {
        user: Identity::new(updated.subject_id, updated.email, updated.role),
    }))
}
