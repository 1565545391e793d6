//! Session Client
//!
//! Per-request state machine:
//!
//! ```text
//! Sent --2xx--> Done
//! Sent --401, not retried--> Refreshing --ok--> RetrySent --> Done | Failed
//!                                      --failed--> Failed (redirect to login)
//! Sent --401, retried--> Failed
//! ```
//!
//! Any status other than 401 propagates unchanged. Requests issued from the
//! login page are never intercepted.

use std::fmt;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::coordinator::RefreshCoordinator;
use crate::error::{ClientError, ClientResult};
use crate::navigator::Navigator;

/// Description of an API call, rebuilt into a fresh HTTP request on every
/// attempt
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Sent,
    Refreshing,
    RetrySent,
    Done,
    Failed,
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RequestPhase::Sent => "SENT",
            RequestPhase::Refreshing => "REFRESHING",
            RequestPhase::RetrySent => "RETRY-SENT",
            RequestPhase::Done => "DONE",
            RequestPhase::Failed => "FAILED",
        })
    }
}

/// HTTP client that keeps a cookie session alive across access expiry
pub struct SessionClient<N> {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    navigator: Arc<N>,
    coordinator: Arc<RefreshCoordinator>,
}

impl<N> Clone for SessionClient<N> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            navigator: self.navigator.clone(),
            coordinator: self.coordinator.clone(),
        }
    }
}

impl<N> SessionClient<N>
where
    N: Navigator,
{
    pub fn new(config: ClientConfig, navigator: Arc<N>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
            navigator,
            coordinator: Arc::new(RefreshCoordinator::new()),
        })
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Send `request`, refreshing the session and replaying once on 401.
    pub async fn send(&self, mut request: ApiRequest) -> ClientResult<reqwest::Response> {
        let origin = self.navigator.current_path();
        let mut phase = RequestPhase::Sent;

        loop {
            let generation = self.coordinator.generation();
            let response = self.dispatch(&request).await?;

            if response.status() != StatusCode::UNAUTHORIZED {
                if response.status().is_success() {
                    self.advance(&request, &mut phase, RequestPhase::Done);
                    return Ok(response);
                }
                self.advance(&request, &mut phase, RequestPhase::Failed);
                return Err(ClientError::from_response(response).await);
            }

            let unauthorized = ClientError::from_response(response).await;

            if request.retried || origin == self.config.login_path {
                self.advance(&request, &mut phase, RequestPhase::Failed);
                return Err(unauthorized);
            }

            request.retried = true;
            self.advance(&request, &mut phase, RequestPhase::Refreshing);

            let outcome = self
                .coordinator
                .refresh(generation, || self.refresh_session())
                .await;

            if !outcome.refreshed {
                self.advance(&request, &mut phase, RequestPhase::Failed);
                // One redirect per failed refresh, not per waiting request.
                if outcome.led {
                    self.navigator.redirect_to(&self.config.login_path);
                }
                return Err(unauthorized);
            }

            if self.navigator.current_path() != origin {
                tracing::debug!(
                    path = %request.path,
                    origin = %origin,
                    "Page changed during refresh, dropping replay"
                );
                self.advance(&request, &mut phase, RequestPhase::Failed);
                return Err(ClientError::Abandoned);
            }

            self.advance(&request, &mut phase, RequestPhase::RetrySent);
        }
    }

    /// [`send`](Self::send) and decode a JSON body.
    pub async fn send_json<T>(&self, request: ApiRequest) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.send(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn dispatch(&self, request: &ApiRequest) -> ClientResult<reqwest::Response> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.config.url(&request.path));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.send().await?)
    }

    async fn refresh_session(&self) -> bool {
        let url = self.config.url(&self.config.refresh_path);
        match self.http.post(url).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Session refreshed");
                true
            }
            Ok(response) => {
                tracing::warn!(status = response.status().as_u16(), "Session refresh rejected");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session refresh failed");
                false
            }
        }
    }

    fn advance(&self, request: &ApiRequest, phase: &mut RequestPhase, next: RequestPhase) {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            from = %phase,
            to = %next,
            "Request phase"
        );
        *phase = next;
    }
}
