//! Domain Layer
//!
//! Contains entities, value objects, repository and provider traits.

pub mod entity;
pub mod provider;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{
    identity::Identity, session_credentials::SessionCredentials, user_profile::UserProfile,
};
pub use provider::{IdentityVerifier, TokenIssuer, VerifiedToken};
pub use repository::{ProfileCounts, ProfileRepository};
