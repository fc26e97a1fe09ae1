//! Credential-refresh recovery.
//!
//! When a request fails with an unauthorized response, the client may hand
//! the failure to a [`RecoveryHandler`]. The handler suspends the caller,
//! asks the injected [`TokenRefreshDelegate`] for a new token, and signals
//! whether the failure was handled. A handled failure authorizes exactly
//! one retry of the original request; the handler never retries on its own
//! and never recurses.
//!
//! The delegate is held weakly: the caller controls its lifetime, and a
//! dropped delegate simply means unauthorized failures pass through
//! unrecovered. Concurrent failing requests are not deduplicated — each
//! one triggers its own refresh round trip.

use std::sync::{Mutex, PoisonError, Weak};

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::token::TokenStore;

/// The hook a host application implements to refresh credentials.
///
/// Returning `Some(token)` means the refresh succeeded and the client
/// should retry the failed request once with the new token. Returning
/// `None` means the refresh failed and the original error should surface
/// unchanged.
#[async_trait]
pub trait TokenRefreshDelegate: Send + Sync {
    /// Performs an out-of-band credential refresh.
    async fn refresh_token(&self) -> Option<String>;
}

/// The handler's two states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RefreshState {
    /// No refresh in flight.
    Idle,
    /// A refresh round trip is in flight for some request.
    Refreshing,
}

/// Drives the refresh protocol for one client.
pub struct RecoveryHandler {
    delegate: Weak<dyn TokenRefreshDelegate>,
    token: TokenStore,
    state: Mutex<RefreshState>,
}

impl RecoveryHandler {
    /// Creates a handler writing refreshed tokens into the given store.
    #[must_use]
    pub fn new(delegate: Weak<dyn TokenRefreshDelegate>, token: TokenStore) -> Self {
        Self {
            delegate,
            token,
            state: Mutex::new(RefreshState::Idle),
        }
    }

    /// Returns `true` if this handler can attempt recovery for the error.
    ///
    /// Only unauthorized responses qualify, and only while the delegate is
    /// still alive.
    #[must_use]
    pub fn can_handle(&self, error: &TransportError) -> bool {
        error.is_unauthorized() && self.delegate.upgrade().is_some()
    }

    /// Returns `true` while a refresh round trip is in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) == RefreshState::Refreshing
    }

    /// Runs one refresh round trip.
    ///
    /// Returns `true` if the delegate supplied a new token (now stored and
    /// visible to the bearer modifier) and the caller should retry once.
    pub async fn attempt_recovery(&self) -> bool {
        let Some(delegate) = self.delegate.upgrade() else {
            return false;
        };

        self.set_state(RefreshState::Refreshing);
        tracing::debug!("credential refresh started");
        let refreshed = delegate.refresh_token().await;
        self.set_state(RefreshState::Idle);

        match refreshed {
            Some(token) => {
                self.token.set(token);
                tracing::debug!("credential refresh succeeded, retrying once");
                true
            }
            None => {
                tracing::warn!("credential refresh failed, surfacing original error");
                false
            }
        }
    }

    fn set_state(&self, state: RefreshState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

impl std::fmt::Debug for RecoveryHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryHandler")
            .field("delegate_alive", &(self.delegate.upgrade().is_some()))
            .field("refreshing", &self.is_refreshing())
            .finish()
    }
}
