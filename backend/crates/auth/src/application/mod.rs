//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod authorize;
pub mod change_role;
pub mod config;
pub mod ensure_profile;
pub mod refresh_session;
pub mod stats;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use authorize::authorize;
pub use change_role::{ChangeRoleInput, ChangeRoleUseCase};
pub use config::{AuthConfig, TokenSource};
pub use ensure_profile::EnsureProfileUseCase;
pub use refresh_session::{RefreshGate, RefreshSessionUseCase};
pub use stats::ProfileStatsUseCase;
