//! Refresh Session Use Case
//!
//! Exchanges a refresh credential for a rotated credential pair.
//!
//! Providers rotate refresh credentials: once exchanged, the old one is
//! dead. Two concurrent refreshes with the same credential would race, and
//! the loser would lose the session. [`RefreshGate`] runs one exchange per
//! credential at a time; callers that arrive while it is in flight receive
//! its outcome. Once the exchange resolves the outcome is dropped, so a
//! later replay of the old credential goes to the provider and fails there.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use platform::crypto::credential_fingerprint;
use tokio::sync::watch;

use crate::domain::entity::session_credentials::SessionCredentials;
use crate::domain::provider::TokenIssuer;
use crate::error::{AuthError, AuthResult};

/// Outcome of an exchange as seen by the callers that joined it
#[derive(Clone)]
enum Landed {
    Rotated(SessionCredentials),
    Rejected,
    Failed,
}

impl Landed {
    fn of(result: &AuthResult<SessionCredentials>) -> Self {
        match result {
            Ok(credentials) => Landed::Rotated(credentials.clone()),
            Err(AuthError::RefreshRejected) => Landed::Rejected,
            Err(_) => Landed::Failed,
        }
    }
}

type Flight = watch::Receiver<Option<Landed>>;

/// Per-credential single-flight for refresh exchanges
#[derive(Default)]
pub struct RefreshGate {
    // Keyed by credential fingerprint, never by the raw credential.
    in_flight: Mutex<HashMap<String, Flight>>,
}

/// Removes the leader's entry, also when the leader is cancelled mid-exchange.
struct Takeoff<'a> {
    gate: &'a RefreshGate,
    key: &'a str,
}

impl Drop for Takeoff<'_> {
    fn drop(&mut self) {
        self.gate.flights().remove(self.key);
    }
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `exchange` for `refresh_credential`, or join the one in flight.
    pub async fn run<F, Fut>(
        &self,
        refresh_credential: &str,
        exchange: F,
    ) -> AuthResult<SessionCredentials>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AuthResult<SessionCredentials>>,
    {
        let key = credential_fingerprint(refresh_credential);

        let joined = {
            let mut flights = self.flights();
            match flights.get(&key) {
                Some(flight) => Err(flight.clone()),
                None => {
                    let (sender, receiver) = watch::channel(None);
                    flights.insert(key.clone(), receiver);
                    Ok(sender)
                }
            }
        };

        let sender = match joined {
            Ok(sender) => sender,
            Err(flight) => return Self::join(flight).await,
        };

        let takeoff = Takeoff {
            gate: self,
            key: &key,
        };
        let result = exchange().await;

        // Unlisted before landing: nobody can join a resolved exchange.
        drop(takeoff);
        sender.send_replace(Some(Landed::of(&result)));
        result
    }

    async fn join(mut flight: Flight) -> AuthResult<SessionCredentials> {
        tracing::debug!("Concurrent refresh joined an in-flight exchange");
        let landed = flight
            .wait_for(Option::is_some)
            .await
            .map(|landed| landed.clone())
            .ok()
            .flatten();

        match landed {
            Some(Landed::Rotated(credentials)) => Ok(credentials),
            Some(Landed::Rejected) => Err(AuthError::RefreshRejected),
            Some(Landed::Failed) => Err(AuthError::Upstream("joined exchange failed".into())),
            None => Err(AuthError::Upstream("joined exchange was abandoned".into())),
        }
    }

    fn flights(&self) -> MutexGuard<'_, HashMap<String, Flight>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Refresh session use case
pub struct RefreshSessionUseCase<I>
where
    I: TokenIssuer,
{
    issuer: Arc<I>,
    gate: Arc<RefreshGate>,
}

impl<I> RefreshSessionUseCase<I>
where
    I: TokenIssuer,
{
    pub fn new(issuer: Arc<I>, gate: Arc<RefreshGate>) -> Self {
        Self { issuer, gate }
    }

    pub async fn execute(
        &self,
        refresh_credential: Option<&str>,
    ) -> AuthResult<SessionCredentials> {
        let refresh_credential = refresh_credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(AuthError::MissingRefreshCredential)?;

        let result = self
            .gate
            .run(refresh_credential, || self.issuer.exchange_refresh(refresh_credential))
            .await;

        match result {
            Ok(credentials) => {
                tracing::info!("Session credentials rotated");
                Ok(credentials)
            }
            Err(AuthError::RefreshRejected) => Err(AuthError::RefreshRejected),
            Err(other) => {
                // The credential may still be good; only the provider can say.
                tracing::error!(error = %other, "Refresh exchange failed upstream");
                Err(AuthError::RefreshUnavailable)
            }
        }
    }
}
