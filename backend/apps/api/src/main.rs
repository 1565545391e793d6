//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::sync::Arc;

use auth::{
    AuthAppState, IdentityToolkitVerifier, InMemoryProfileRepository, PgProfileRepository,
    SecureTokenIssuer, auth_router, protect_routes,
};
use axum::{
    Json, Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
    routing::get,
};
use platform::outbound::{HttpClientConfig, build_client};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,client=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    if !config.auth.cookie_secure {
        tracing::warn!("COOKIE_SECURE is off; session cookies will be sent over plain HTTP");
    }

    // Identity provider adapters share one outbound client
    let http_client = build_client(&HttpClientConfig::with_timeout(config.upstream_timeout))?;
    let verifier = Arc::new(IdentityToolkitVerifier::new(
        http_client.clone(),
        config.provider.clone(),
    ));
    let issuer = Arc::new(SecureTokenIssuer::new(http_client, config.provider.clone()));

    // Profile store
    let api = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            auth_router(AuthAppState::new(
                Arc::new(PgProfileRepository::new(pool)),
                verifier,
                issuer,
                config.auth.clone(),
            ))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, profiles are kept in memory and lost on restart");
            auth_router(AuthAppState::new(
                Arc::new(InMemoryProfileRepository::new()),
                verifier,
                issuer,
                config.auth.clone(),
            ))
        }
    };

    let app = build_app(api, &config);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Assemble the full application around the auth routes.
fn build_app(api: Router, config: &ApiConfig) -> Router {
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(from_fn_with_state(
            Arc::new(config.auth.clone()),
            protect_routes,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = ApiConfig::from_lookup(|key| {
            (key == "FIREBASE_API_KEY").then(|| "test-key".to_string())
        })
        .unwrap();
        // Unreachable provider: no test here gets past credential extraction.
        let mut provider = config.provider.clone();
        provider.lookup_url = "http://127.0.0.1:9/lookup".to_string();
        provider.token_url = "http://127.0.0.1:9/token".to_string();

        let client = build_client(&HttpClientConfig::default()).unwrap();
        let api = auth_router(AuthAppState::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(IdentityToolkitVerifier::new(client.clone(), provider.clone())),
            Arc::new(SecureTokenIssuer::new(client, provider)),
            config.auth.clone(),
        ));
        build_app(api, &config)
    }

    async fn status_of(app: &Router, req: Request<Body>) -> StatusCode {
        app.clone().oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_api_routes_are_nested() {
        let app = test_app();
        let req = Request::get("/api/profile").body(Body::empty()).unwrap();
        assert_eq!(status_of(&app, req).await, StatusCode::UNAUTHORIZED);

        let req = Request::post("/api/auth/logout").body(Body::empty()).unwrap();
        assert_eq!(status_of(&app, req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_edge_redirects_pages_not_api() {
        let app = test_app();
        let req = Request::get("/dashboard").body(Body::empty()).unwrap();
        assert_eq!(status_of(&app, req).await, StatusCode::TEMPORARY_REDIRECT);

        let req = Request::get("/api/admin/stats").body(Body::empty()).unwrap();
        assert_eq!(status_of(&app, req).await, StatusCode::UNAUTHORIZED);
    }
}
