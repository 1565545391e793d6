//! Router-level scenario tests for the auth crate
//!
//! The real router runs against the in-memory profile store and fake
//! identity provider ports, driven with `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::domain::entity::session_credentials::SessionCredentials;
    use crate::domain::entity::user_profile::UserProfile;
    use crate::domain::provider::{IdentityVerifier, TokenIssuer, VerifiedToken};
    use crate::domain::value_object::{SubjectId, user_role::UserRole};
    use crate::error::{AuthError, AuthResult};
    use crate::infra::memory::InMemoryProfileRepository;
    use crate::presentation::{AuthAppState, auth_router};

    /// `valid-<uid>` verifies as `<uid>` with `<uid>@example.com`;
    /// `down` simulates a provider outage; anything else is invalid.
    pub struct FakeVerifier;

    impl IdentityVerifier for FakeVerifier {
        async fn verify(&self, credential: &str) -> AuthResult<VerifiedToken> {
            if credential == "down" {
                return Err(AuthError::Upstream("connection refused".to_string()));
            }
            let uid = credential
                .strip_prefix("valid-")
                .ok_or(AuthError::InvalidCredential)?;
            Ok(VerifiedToken {
                subject_id: SubjectId::parse(uid)?,
                email: Some(format!("{}@example.com", uid)),
                claims: Default::default(),
            })
        }
    }

    /// Accepts only `refresh-ok`, rotating it into `access-new`/`refresh-new`.
    pub struct FakeIssuer;

    impl TokenIssuer for FakeIssuer {
        async fn exchange_refresh(
            &self,
            refresh_credential: &str,
        ) -> AuthResult<SessionCredentials> {
            match refresh_credential {
                "refresh-ok" => Ok(SessionCredentials::new("access-new", "refresh-new")?),
                "down" => Err(AuthError::Upstream("timeout".to_string())),
                _ => Err(AuthError::RefreshRejected),
            }
        }
    }

    pub fn app_with(config: AuthConfig) -> (Router, Arc<InMemoryProfileRepository>) {
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let state = AuthAppState::new(
            profiles.clone(),
            Arc::new(FakeVerifier),
            Arc::new(FakeIssuer),
            config,
        );
        (auth_router(state), profiles)
    }

    pub fn app() -> (Router, Arc<InMemoryProfileRepository>) {
        app_with(AuthConfig::development())
    }

    pub async fn seed(profiles: &InMemoryProfileRepository, uid: &str, role: UserRole) {
        profiles
            .insert(
                UserProfile::new(SubjectId::parse(uid).unwrap(), format!("{}@example.com", uid))
                    .with_role(role),
            )
            .await;
    }

    pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
        app.clone().oneshot(req).await.unwrap()
    }

    pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn send_json(method: &str, path: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub fn post(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::post(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub async fn body_json(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub fn set_cookies(resp: &Response<Body>) -> Vec<String> {
        resp.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    pub fn cookie_named<'a>(cookies: &'a [String], name: &str) -> &'a str {
        cookies
            .iter()
            .find(|c| c.starts_with(&format!("{}=", name)))
            .map(String::as_str)
            .unwrap_or_else(|| panic!("no Set-Cookie for {}", name))
    }
}

#[cfg(test)]
mod session_tests {
    use super::support::*;
    use crate::application::config::AuthConfig;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_then_profile() {
        let (app, _) = app();

        let resp = send(
            &app,
            send_json(
                "POST",
                "/auth/login",
                None,
                json!({"idToken": "valid-u1", "refreshToken": "refresh-ok"}),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookies = set_cookies(&resp);
        let access = cookie_named(&cookies, "access_token");
        assert!(access.starts_with("access_token=valid-u1;"));
        assert!(access.contains("Max-Age=3600"));
        assert!(access.contains("HttpOnly"));
        assert!(access.contains("SameSite=Lax"));
        let refresh = cookie_named(&cookies, "refresh_token");
        assert!(refresh.starts_with("refresh_token=refresh-ok;"));
        assert!(refresh.contains("Max-Age=1209600"));
        assert_eq!(body_json(resp).await, json!({"status": "success"}));

        let resp = send(&app, get("/profile", Some("access_token=valid-u1"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"user": {"uid": "u1", "email": "u1@example.com", "role": "user"}})
        );
    }

    #[tokio::test]
    async fn test_login_rejects_empty_or_malformed_body() {
        let (app, _) = app();

        let resp = send(
            &app,
            send_json("POST", "/auth/login", None, json!({"idToken": "", "refreshToken": "r"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(set_cookies(&resp).is_empty());

        let req = send_json("POST", "/auth/login", None, json!({"idToken": "a"}));
        let resp = send(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_refresh_rotates_both_cookies() {
        let (app, _) = app();

        let resp = send(&app, post("/auth/refresh", Some("refresh_token=refresh-ok"))).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookies = set_cookies(&resp);
        let access = cookie_named(&cookies, "access_token");
        assert!(access.starts_with("access_token=access-new;"));
        assert!(access.contains("Max-Age=3600"));
        let refresh = cookie_named(&cookies, "refresh_token");
        assert!(refresh.starts_with("refresh_token=refresh-new;"));
        assert!(refresh.contains("Max-Age=1209600"));

        assert_eq!(body_json(resp).await, json!({"status": "refreshed"}));
    }

    #[tokio::test]
    async fn test_refresh_without_cookie() {
        let (app, _) = app();

        // An access cookie alone is not enough.
        let resp = send(&app, post("/auth/refresh", Some("access_token=valid-u1"))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&resp).is_empty());
        assert_eq!(body_json(resp).await["detail"], "No refresh token");
    }

    #[tokio::test]
    async fn test_rejected_refresh_clears_cookies() {
        let (app, _) = app();

        let cookie = "access_token=x; refresh_token=refresh-revoked";
        let resp = send(&app, post("/auth/refresh", Some(cookie))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let cookies = set_cookies(&resp);
        assert!(cookie_named(&cookies, "access_token").contains("Max-Age=0"));
        assert!(cookie_named(&cookies, "refresh_token").contains("Max-Age=0"));
        assert_eq!(body_json(resp).await["detail"], "Refresh failed");
    }

    #[tokio::test]
    async fn test_refresh_during_outage_keeps_cookies() {
        let (app, _) = app_with(AuthConfig::default());

        let resp = send(&app, post("/auth/refresh", Some("refresh_token=down"))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookies(&resp).is_empty());
        assert_eq!(body_json(resp).await["detail"], "Refresh temporarily unavailable");
    }

    #[tokio::test]
    async fn test_logout_clears_cookies() {
        let (app, _) = app();

        let resp = send(&app, post("/auth/logout", None)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let cookies = set_cookies(&resp);
        assert!(cookie_named(&cookies, "access_token").contains("Max-Age=0"));
        assert!(cookie_named(&cookies, "refresh_token").contains("Max-Age=0"));
        assert_eq!(body_json(resp).await, json!({"status": "logged out"}));
    }
}

#[cfg(test)]
mod guard_tests {
    use super::support::*;
    use crate::application::config::{AuthConfig, TokenSource};
    use crate::domain::repository::ProfileRepository;
    use crate::domain::value_object::user_role::UserRole;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_credential_is_rejected() {
        let (app, profiles) = app();

        for req in [get("/profile", None), post("/users", None), get("/admin/stats", None)] {
            let resp = send(&app, req).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body = body_json(resp).await;
            assert_eq!(body["detail"], "No token provided");
            assert_eq!(body["status"], 401);
        }

        // No handler ran.
        assert_eq!(profiles.counts().await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_invalid_and_unavailable_look_the_same() {
        let (app, _) = app();

        for credential in ["forged", "down"] {
            let cookie = format!("access_token={}", credential);
            let resp = send(&app, get("/profile", Some(&cookie))).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(body_json(resp).await["detail"], "Invalid or expired token");
        }
    }

    #[tokio::test]
    async fn test_role_follows_profile_store() {
        let (app, profiles) = app();
        seed(&profiles, "boss", UserRole::Admin).await;

        let resp = send(&app, get("/profile", Some("access_token=valid-boss"))).await;
        assert_eq!(body_json(resp).await["user"]["role"], "admin");

        // No profile yet: defaulted, not rejected.
        let resp = send(&app, get("/profile", Some("access_token=valid-newbie"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["user"]["role"], "user");
    }

    #[tokio::test]
    async fn test_admin_endpoints_require_admin() {
        let (app, profiles) = app();
        seed(&profiles, "u1", UserRole::User).await;
        seed(&profiles, "boss", UserRole::Admin).await;

        let resp = send(&app, get("/admin/stats", Some("access_token=valid-u1"))).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(resp).await["detail"], "Insufficient permissions");

        let resp = send(&app, get("/admin/stats", Some("access_token=valid-boss"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({"totalUsers": 2, "adminUsers": 1}));
    }

    #[tokio::test]
    async fn test_bearer_mode_ignores_cookies() {
        let (app, _) = app_with(AuthConfig {
            token_source: TokenSource::BearerHeader,
            ..AuthConfig::development()
        });

        let resp = send(&app, get("/profile", Some("access_token=valid-u1"))).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = Request::get("/profile")
            .header(header::AUTHORIZATION, "Bearer valid-u1")
            .body(Body::empty())
            .unwrap();
        let resp = send(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["user"]["uid"], "u1");
    }
}

#[cfg(test)]
mod profile_tests {
    use super::support::*;
    use crate::domain::repository::ProfileRepository;
    use crate::domain::value_object::{SubjectId, user_role::UserRole};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_profile_is_idempotent() {
        let (app, profiles) = app();

        let mut bodies = Vec::new();
        for _ in 0..2 {
            let resp = send(&app, post("/users", Some("access_token=valid-u1"))).await;
            assert_eq!(resp.status(), StatusCode::OK);
            bodies.push(body_json(resp).await);
        }
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[0], json!({"status": "success", "message": "Profile initialized"}));

        assert_eq!(profiles.counts().await.unwrap().total, 1);
        let stored = profiles
            .find_by_subject(&SubjectId::parse("u1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.role, UserRole::User);
        assert_eq!(stored.email, "u1@example.com");
    }

    #[tokio::test]
    async fn test_create_profile_keeps_existing_role() {
        let (app, profiles) = app();
        seed(&profiles, "boss", UserRole::Admin).await;

        let resp = send(&app, post("/users", Some("access_token=valid-boss"))).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = send(&app, get("/profile", Some("access_token=valid-boss"))).await;
        assert_eq!(body_json(resp).await["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn test_change_role() {
        let (app, profiles) = app();
        seed(&profiles, "boss", UserRole::Admin).await;
        seed(&profiles, "u2", UserRole::User).await;
        let admin = Some("access_token=valid-boss");

        let resp = send(
            &app,
            send_json("PUT", "/admin/users/ghost/role", admin, json!({"role": "admin"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = send(
            &app,
            send_json("PUT", "/admin/users/u2/role", admin, json!({"role": "superuser"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = send(
            &app,
            send_json("PUT", "/admin/users/u2/role", admin, json!({"role": "admin"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            body_json(resp).await,
            json!({"user": {"uid": "u2", "email": "u2@example.com", "role": "admin"}})
        );

        // Takes effect on the very next request.
        let resp = send(&app, get("/admin/stats", Some("access_token=valid-u2"))).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_user_cannot_change_roles() {
        let (app, profiles) = app();
        seed(&profiles, "u1", UserRole::User).await;

        let resp = send(
            &app,
            send_json(
                "PUT",
                "/admin/users/u1/role",
                Some("access_token=valid-u1"),
                json!({"role": "admin"}),
            ),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}

#[cfg(test)]
mod edge_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::http::{StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get as get_route;

    use super::support::*;
    use crate::application::config::AuthConfig;
    use crate::presentation::edge::protect_routes;

    fn pages() -> Router {
        Router::new()
            .route("/dashboard", get_route(|| async { "dashboard" }))
            .route("/admin/users", get_route(|| async { "admin" }))
            .route("/administrator", get_route(|| async { "lookalike" }))
            .route("/login", get_route(|| async { "login" }))
            .layer(from_fn_with_state(
                Arc::new(AuthConfig::development()),
                protect_routes,
            ))
    }

    #[tokio::test]
    async fn test_protected_page_without_cookies_redirects() {
        let app = pages();
        for path in ["/dashboard", "/admin/users"] {
            let resp = send(&app, get(path, None)).await;
            assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
            assert_eq!(resp.headers()[header::LOCATION], "/login");
        }
    }

    #[tokio::test]
    async fn test_any_session_cookie_passes() {
        let app = pages();
        for cookie in ["access_token=a", "refresh_token=r"] {
            let resp = send(&app, get("/dashboard", Some(cookie))).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_unprotected_pages_pass() {
        let app = pages();
        for path in ["/login", "/administrator"] {
            let resp = send(&app, get(path, None)).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
    }
}
