//! Authentication state observable
//!
//! The identity provider itself lives outside this workspace. This module only
//! holds the value it publishes: whether a user is signed in, and who. Anything
//! that must react to login or logout subscribes to the [`AuthStore`] channel.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Point-in-time view of the authentication state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    /// Whether a user is signed in
    pub is_authenticated: bool,
    /// Identifier of the signed-in user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl AuthSnapshot {
    /// Snapshot for a signed-in user
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user_id: Some(user_id.into()),
        }
    }

    /// Snapshot with nobody signed in
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Check whether `user_id` is the signed-in user
    pub fn is_user(&self, user_id: &str) -> bool {
        self.is_authenticated && self.user_id.as_deref() == Some(user_id)
    }
}

/// Source of authentication state
///
/// Injected into the navigation layer so it can be exercised without a real
/// identity provider.
#[cfg_attr(test, mockall::automock)]
pub trait AuthStateProvider: Send + Sync {
    /// Current authentication state
    fn snapshot(&self) -> AuthSnapshot;

    /// Subscribe to authentication state changes
    fn subscribe(&self) -> watch::Receiver<AuthSnapshot>;
}

/// Holder of the published authentication state
///
/// # Example
///
/// ```
/// use app_state::auth::{AuthStateProvider, AuthStore};
///
/// let store = AuthStore::new();
/// let rx = store.subscribe();
///
/// store.sign_in("u1");
/// assert!(rx.borrow().is_authenticated);
/// ```
#[derive(Debug)]
pub struct AuthStore {
    tx: watch::Sender<AuthSnapshot>,
}

impl AuthStore {
    /// Create a store with nobody signed in
    pub fn new() -> Self {
        Self::with_snapshot(AuthSnapshot::signed_out())
    }

    /// Create a store with a known initial state (e.g. a restored session)
    pub fn with_snapshot(initial: AuthSnapshot) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a sign-in
    pub fn sign_in(&self, user_id: impl Into<String>) {
        self.publish(AuthSnapshot::signed_in(user_id));
    }

    /// Publish a sign-out
    pub fn sign_out(&self) {
        self.publish(AuthSnapshot::signed_out());
    }

    /// Whether a user is currently signed in
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated
    }

    fn publish(&self, next: AuthSnapshot) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        });

        if changed {
            tracing::debug!(
                authenticated = next.is_authenticated,
                user_id = next.user_id.as_deref().unwrap_or("-"),
                "auth state changed"
            );
        }
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStateProvider for AuthStore {
    fn snapshot(&self) -> AuthSnapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.tx.subscribe()
    }
}
