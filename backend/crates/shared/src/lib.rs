//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the smallest shared vocabulary of the backend:
//! - Error classification and the unified application error
//! - Typed wrappers for identifiers issued by external systems
//!
//! Only things whose meaning is identical in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
