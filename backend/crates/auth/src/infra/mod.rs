//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

pub mod identity_toolkit;
pub mod memory;
pub mod postgres;

pub use identity_toolkit::{IdentityToolkitVerifier, ProviderEndpoints, SecureTokenIssuer};
pub use memory::InMemoryProfileRepository;
pub use postgres::PgProfileRepository;
