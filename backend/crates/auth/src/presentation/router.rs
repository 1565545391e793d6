//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

use crate::domain::provider::{IdentityVerifier, TokenIssuer};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::required_roles::RequiredRoles;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_identity, require_roles};

/// Create the auth router for any set of ports.
///
/// Routes are relative; the caller nests them under the API base path.
/// Guard order on protected routes: authentication, then authorization.
pub fn auth_router<P, V, I>(state: AuthAppState<P, V, I>) -> Router
where
    P: ProfileRepository + Sync + 'static,
    V: IdentityVerifier + Sync + 'static,
    I: TokenIssuer + Sync + 'static,
{
    let session = Router::new()
        .route("/auth/login", post(handlers::login::<P, V, I>))
        .route("/auth/refresh", post(handlers::refresh::<P, V, I>))
        .route("/auth/logout", post(handlers::logout::<P, V, I>));

    let admin = Router::new()
        .route("/admin/stats", get(handlers::admin_stats::<P, V, I>))
        .route("/admin/users/{uid}/role", put(handlers::change_role::<P, V, I>))
        .route_layer(from_fn_with_state(RequiredRoles::admin(), require_roles));

    let protected = Router::new()
        .route("/profile", get(handlers::profile))
        .route("/users", post(handlers::create_profile::<P, V, I>))
        .merge(admin)
        .route_layer(from_fn_with_state(
            state.clone(),
            require_identity::<P, V, I>,
        ));

    session.merge(protected).with_state(state)
}
