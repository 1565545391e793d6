//! Identity Provider HTTP Adapters
//!
//! `IdentityToolkitVerifier` checks access credentials against the
//! provider's account lookup endpoint; `SecureTokenIssuer` performs the
//! `refresh_token` grant. Both URLs are configurable so tests (and
//! emulators) can point them elsewhere.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::entity::session_credentials::SessionCredentials;
use crate::domain::provider::{IdentityVerifier, TokenIssuer, VerifiedToken};
use crate::domain::value_object::SubjectId;
use crate::error::{AuthError, AuthResult};

pub const DEFAULT_LOOKUP_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";
pub const DEFAULT_SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";

/// Where and how to reach the identity provider
#[derive(Clone)]
pub struct ProviderEndpoints {
    pub api_key: String,
    pub lookup_url: String,
    pub token_url: String,
}

impl ProviderEndpoints {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            token_url: DEFAULT_SECURE_TOKEN_URL.to_string(),
        }
    }
}

// The API key is a secret too.
impl std::fmt::Debug for ProviderEndpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderEndpoints")
            .field("api_key", &"[REDACTED]")
            .field("lookup_url", &self.lookup_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

// ============================================================================
// Verifier
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Clone)]
pub struct IdentityToolkitVerifier {
    client: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl IdentityToolkitVerifier {
    pub fn new(client: reqwest::Client, endpoints: ProviderEndpoints) -> Self {
        Self { client, endpoints }
    }
}

impl IdentityVerifier for IdentityToolkitVerifier {
    async fn verify(&self, credential: &str) -> AuthResult<VerifiedToken> {
        let response = self
            .client
            .post(&self.endpoints.lookup_url)
            .query(&[("key", self.endpoints.api_key.as_str())])
            .json(&LookupRequest { id_token: credential })
            .send()
            .await
            .map_err(|e| AuthError::Upstream(format!("account lookup: {}", e)))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::BAD_REQUEST => return Err(AuthError::InvalidCredential),
            status => {
                return Err(AuthError::Upstream(format!(
                    "account lookup returned {}",
                    status
                )));
            }
        }

        let body: Map<String, Value> = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(format!("account lookup body: {}", e)))?;

        let user = body
            .get("users")
            .and_then(Value::as_array)
            .and_then(|users| users.first())
            .and_then(Value::as_object)
            .ok_or(AuthError::InvalidCredential)?;

        let subject_id = user
            .get("localId")
            .and_then(Value::as_str)
            .and_then(|id| SubjectId::parse(id).ok())
            .ok_or(AuthError::InvalidCredential)?;

        let email = user
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(VerifiedToken {
            subject_id,
            email,
            claims: user.clone(),
        })
    }
}

// ============================================================================
// Issuer
// ============================================================================

#[derive(Serialize)]
struct RefreshGrant<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshGrantResponse {
    id_token: String,
    refresh_token: String,
}

#[derive(Clone)]
pub struct SecureTokenIssuer {
    client: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl SecureTokenIssuer {
    pub fn new(client: reqwest::Client, endpoints: ProviderEndpoints) -> Self {
        Self { client, endpoints }
    }
}

impl TokenIssuer for SecureTokenIssuer {
    async fn exchange_refresh(&self, refresh_credential: &str) -> AuthResult<SessionCredentials> {
        let response = self
            .client
            .post(&self.endpoints.token_url)
            .query(&[("key", self.endpoints.api_key.as_str())])
            .json(&RefreshGrant {
                grant_type: "refresh_token",
                refresh_token: refresh_credential,
            })
            .send()
            .await
            .map_err(|e| AuthError::Upstream(format!("token exchange: {}", e)))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AuthError::RefreshRejected);
            }
            status => {
                return Err(AuthError::Upstream(format!(
                    "token exchange returned {}",
                    status
                )));
            }
        }

        let grant: RefreshGrantResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Upstream(format!("token exchange body: {}", e)))?;

        SessionCredentials::new(grant.id_token, grant.refresh_token)
            .map_err(|e| AuthError::Upstream(format!("token exchange body: {}", e)))
    }
}
