//! Session Client
//!
//! Client side of the cookie session: an HTTP client that, on a 401 from a
//! protected call, refreshes the session once and replays the call once.
//!
//! ## Features
//! - Concurrent 401s coalesce into a single refresh call
//! - Calls made from the login page are never intercepted
//! - Replays are dropped after navigation away from the issuing page
//! - A dead session redirects to login through the [`Navigator`] seam

pub mod config;
pub mod coordinator;
pub mod error;
pub mod navigator;
pub mod session;

pub use config::ClientConfig;
pub use coordinator::{RefreshCoordinator, RefreshOutcome};
pub use error::{ClientError, ClientResult};
pub use navigator::{HeadlessNavigator, Navigator};
pub use session::{ApiRequest, RequestPhase, SessionClient};
