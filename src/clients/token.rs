//! The client's bearer-token cell.
//!
//! A single authoritative token value shared between the client owner, the
//! bearer-token modifier, and the credential-refresh recovery handler.
//! Reads and writes go through a lock so a reader can never observe a
//! partially written value; modifiers read the live value at the moment a
//! request is sent, never a value captured at construction time.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// A shared, thread-safe cell holding the current bearer token.
///
/// Cloning a `TokenStore` clones the handle, not the value: all clones
/// observe the same token.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<String>>,
}

impl TokenStore {
    /// Creates an empty token store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current token value.
    #[must_use]
    pub fn get(&self) -> String {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current token with a whole-value swap.
    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = token.into();
    }

    /// Returns `true` if no token is currently set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenStore(*****)")
    }
}

// Verify TokenStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenStore>();
};
