//! Auth Middleware
//!
//! The Authentication Guard and Authorization Guard as axum middleware.
//! Authentication runs first and leaves an [`Identity`] in the request
//! extensions; authorization only reads it.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use platform::headers::extract_bearer;

use crate::application::config::{AuthConfig, TokenSource};
use crate::application::{AuthenticateUseCase, authorize};
use crate::domain::entity::identity::Identity;
use crate::domain::provider::{IdentityVerifier, TokenIssuer};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::required_roles::RequiredRoles;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;
use crate::presentation::session_cookie::SessionCookies;

/// Read the access credential from wherever this deployment carries it.
pub fn access_credential(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    match config.token_source {
        TokenSource::Cookie => {
            SessionCookies::new(config).access(&CookieJar::from_headers(headers))
        }
        TokenSource::BearerHeader => extract_bearer(headers),
    }
}

/// Middleware that requires a verified identity
pub async fn require_identity<P, V, I>(
    State(state): State<AuthAppState<P, V, I>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    P: ProfileRepository + Sync + 'static,
    V: IdentityVerifier + Sync + 'static,
    I: TokenIssuer + Sync + 'static,
{
    let credential = access_credential(req.headers(), &state.config);

    let use_case = AuthenticateUseCase::new(state.verifier.clone(), state.profiles.clone());
    let identity = use_case.execute(credential.as_deref()).await?;

    tracing::debug!(
        subject_id = %identity.subject_id,
        role = %identity.role,
        path = %req.uri().path(),
        "Request authenticated"
    );

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Middleware that requires one of a static set of roles.
///
/// Must be layered inside [`require_identity`].
pub async fn require_roles(
    State(required): State<RequiredRoles>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    authorize(req.extensions().get::<Identity>(), &required)?;
    Ok(next.run(req).await)
}

/// Extractor for the identity resolved by [`require_identity`]
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AuthError::AuthenticationRequired)
    }
}
