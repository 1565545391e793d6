//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod edge;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod session_cookie;

pub use edge::protect_routes;
pub use handlers::AuthAppState;
pub use middleware::{CurrentIdentity, access_credential, require_identity, require_roles};
pub use router::auth_router;
pub use session_cookie::SessionCookies;
