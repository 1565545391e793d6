//! Client Configuration

use std::time::Duration;

/// Session client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://app.example.com/api`
    pub base_url: String,
    /// Refresh endpoint, relative to `base_url`
    pub refresh_path: String,
    /// Login entry point; also the page whose calls are never intercepted
    pub login_path: String,
    /// Per-attempt request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_path: "/auth/refresh".to_string(),
            login_path: "/login".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
