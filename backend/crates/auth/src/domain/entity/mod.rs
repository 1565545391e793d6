//! Entity Module

pub mod identity;
pub mod session_credentials;
pub mod user_profile;
