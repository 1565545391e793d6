//! Edge Route Protection
//!
//! Coarse pre-check for page routes: a protected path without any session
//! cookie is redirected to the login entry point. Cookie presence is all
//! that is checked; API routes still go through the Authentication Guard.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::application::config::AuthConfig;
use crate::presentation::session_cookie::SessionCookies;

pub async fn protect_routes(
    State(config): State<Arc<AuthConfig>>,
    req: Request,
    next: Next,
) -> Response {
    if config.is_protected_path(req.uri().path())
        && !SessionCookies::new(&config).present(&CookieJar::from_headers(req.headers()))
    {
        tracing::debug!(
            path = %req.uri().path(),
            "No session cookie on protected route, redirecting"
        );
        return Redirect::temporary(&config.login_path).into_response();
    }

    next.run(req).await
}
