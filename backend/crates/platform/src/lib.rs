//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cookie policy (flags, lifetimes, expiry cookies)
//! - Request header helpers (cookies, bearer credentials)
//! - Credential fingerprinting (never keep raw secrets as map keys)
//! - Outbound HTTP client construction

pub mod cookie;
pub mod crypto;
pub mod headers;
pub mod outbound;
