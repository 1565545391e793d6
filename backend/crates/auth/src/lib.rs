//! Auth (Session and Access Control) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Roles, identity, profiles, credential pairs, ports
//! - `application/` - Use cases and application services
//! - `infra/` - Profile stores and identity provider adapters
//! - `presentation/` - Cookie manager, guards, handlers, router
//!
//! ## Features
//! - Browser sessions as an access/refresh credential pair in HTTP-only cookies
//! - Per-request credential verification against the identity provider
//! - Role resolution from the profile store (`user` when no profile exists)
//! - Role-gated endpoints (`user`, `admin`)
//! - Refresh with per-credential single-flight on rotation
//!
//! ## Security Model
//! - No server-side cache of verified credentials; every request re-verifies
//! - Absent and invalid credentials are indistinguishable beyond the 401
//! - Provider outages during verification surface as 401, detail in logs only
//! - Roles change only through the admin endpoint

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{
    InMemoryProfileRepository, IdentityToolkitVerifier, PgProfileRepository, ProviderEndpoints,
    SecureTokenIssuer,
};
pub use presentation::{AuthAppState, auth_router, protect_routes};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryProfileRepository as MemoryStore;
    pub use crate::infra::postgres::PgProfileRepository as ProfileStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::edge::*;
    pub use crate::presentation::middleware::*;
}

mod tests;
