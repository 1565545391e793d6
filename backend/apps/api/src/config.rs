//! Environment Configuration
//!
//! Everything the server reads from the environment, parsed once at
//! startup. Missing optional values fall back to defaults; malformed values
//! abort startup.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use auth::ProviderEndpoints;
use auth::config::{AuthConfig, TokenSource};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory profile store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub provider: ProviderEndpoints,
    pub frontend_origins: Vec<String>,
    pub upstream_timeout: Duration,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key =
            get("FIREBASE_API_KEY").ok_or_else(|| anyhow!("FIREBASE_API_KEY must be set"))?;
        let mut provider = ProviderEndpoints::new(api_key);
        if let Some(url) = get("IDENTITY_LOOKUP_URL") {
            provider.lookup_url = url;
        }
        if let Some(url) = get("SECURE_TOKEN_URL") {
            provider.token_url = url;
        }

        let defaults = AuthConfig::default();
        let auth = AuthConfig {
            cookie_secure: parse_or(&get, "COOKIE_SECURE", false)?,
            token_source: match get("TOKEN_SOURCE") {
                Some(raw) => {
                    TokenSource::from_str(&raw).map_err(|e| anyhow!("TOKEN_SOURCE: {}", e))?
                }
                None => TokenSource::default(),
            },
            protected_prefixes: get("PROTECTED_PREFIXES")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.protected_prefixes.clone()),
            login_path: get("LOGIN_PATH").unwrap_or(defaults.login_path.clone()),
            ..defaults
        };

        Ok(Self {
            bind_addr: parse_or(&get, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            database_url: get("DATABASE_URL"),
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            provider,
            frontend_origins: get("FRONTEND_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or_else(|| vec!["http://localhost:3001".to_string()]),
            upstream_timeout: Duration::from_secs(parse_or(&get, "UPSTREAM_TIMEOUT_SECS", 10)?),
            auth,
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw.parse().with_context(|| format!("{} is malformed: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("FIREBASE_API_KEY", "k")]).unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.database_url.is_none());
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.token_source, TokenSource::Cookie);
        assert_eq!(config.auth.protected_prefixes, vec!["/dashboard", "/admin"]);
        assert_eq!(config.auth.login_path, "/login");
        assert_eq!(config.auth.access_cookie_name, "access_token");
        assert_eq!(
            config.provider.token_url,
            auth::infra::identity_toolkit::DEFAULT_SECURE_TOKEN_URL
        );
    }

    #[test]
    fn test_api_key_required() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("FIREBASE_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("FIREBASE_API_KEY", "k"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("COOKIE_SECURE", "true"),
            ("TOKEN_SOURCE", "bearer"),
            ("PROTECTED_PREFIXES", "/app, /settings,"),
            ("SECURE_TOKEN_URL", "http://localhost:9099/token"),
            ("FRONTEND_ORIGINS", "https://a.example,https://b.example"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert!(config.auth.cookie_secure);
        assert_eq!(config.auth.token_source, TokenSource::BearerHeader);
        assert_eq!(config.auth.protected_prefixes, vec!["/app", "/settings"]);
        assert_eq!(config.provider.token_url, "http://localhost:9099/token");
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_malformed_values_fail() {
        for (key, value) in [
            ("COOKIE_SECURE", "maybe"),
            ("TOKEN_SOURCE", "carrier-pigeon"),
            ("BIND_ADDR", "nowhere"),
        ] {
            assert!(config_from(&[("FIREBASE_API_KEY", "k"), (key, value)]).is_err());
        }
    }
}
