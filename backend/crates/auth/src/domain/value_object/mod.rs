//! Value Object Module

pub mod required_roles;
pub mod user_role;

/// Subject identifier assigned by the identity provider
pub use kernel::id::SubjectId;
