//! Refresh Coordinator
//!
//! One refresh in flight per session. Every request records the refresh
//! generation before it is sent; a 401 observed under a generation that
//! has since been superseded reuses the newer outcome instead of starting
//! another refresh with an already-rotated credential.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

/// What a caller learns from [`RefreshCoordinator::refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Whether the session is usable again
    pub refreshed: bool,
    /// Whether this caller ran the refresh rather than joining one
    pub led: bool,
}

#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    generation: AtomicU64,
    last_outcome: Mutex<Option<bool>>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation to record before sending a request
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Refresh on behalf of a request sent under `observed`.
    ///
    /// Callers queued behind a running refresh get its outcome.
    pub async fn refresh<F, Fut>(&self, observed: u64, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let mut last_outcome = self.last_outcome.lock().await;

        if self.generation() != observed {
            if let Some(refreshed) = *last_outcome {
                tracing::debug!(refreshed, "Joined completed refresh");
                return RefreshOutcome {
                    refreshed,
                    led: false,
                };
            }
        }

        let refreshed = refresh().await;
        *last_outcome = Some(refreshed);
        self.generation.fetch_add(1, Ordering::AcqRel);
        RefreshOutcome {
            refreshed,
            led: true,
        }
    }
}
