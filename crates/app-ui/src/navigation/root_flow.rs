//! Root flow selection
//!
//! Chooses between the signed-in app shell and the authentication shell, and
//! rebuilds the navigation stack whenever the choice changes.

use app_state::auth::AuthSnapshot;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

use super::config::NavigationConfig;
use super::destination::Destination;
use super::stack::SharedNavigationStack;

/// Top-level shell shown by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootFlow {
    /// Signed-in app shell
    Authenticated,
    /// Login and signup shell
    Unauthenticated,
}

impl RootFlow {
    /// Flow for an auth signal value
    pub fn from_auth(is_authenticated: bool) -> Self {
        if is_authenticated {
            RootFlow::Authenticated
        } else {
            RootFlow::Unauthenticated
        }
    }
}

/// Keeps the root flow in step with the auth signal
///
/// Clones share the same flow state and stack.
#[derive(Clone)]
pub struct RootFlowSelector {
    stack: SharedNavigationStack,
    home: Destination,
    login: Destination,
    flow_tx: Arc<watch::Sender<RootFlow>>,
}

impl RootFlowSelector {
    /// Mount the selector
    ///
    /// The initial flow comes from the auth signal's value at mount time, and
    /// the stack is rebuilt with that flow's entry destination.
    pub fn mount(
        stack: SharedNavigationStack,
        config: &NavigationConfig,
        is_authenticated: bool,
    ) -> Self {
        let flow = RootFlow::from_auth(is_authenticated);
        let (flow_tx, _) = watch::channel(flow);
        let selector = Self {
            stack,
            home: config.home.clone(),
            login: config.login.clone(),
            flow_tx: Arc::new(flow_tx),
        };

        tracing::info!(?flow, "root flow mounted");
        selector.rebuild(flow);
        selector
    }

    /// Current flow
    pub fn flow(&self) -> RootFlow {
        *self.flow_tx.borrow()
    }

    /// Subscribe to flow changes
    pub fn subscribe(&self) -> watch::Receiver<RootFlow> {
        self.flow_tx.subscribe()
    }

    /// Navigation stack driven by this selector
    pub fn stack(&self) -> &SharedNavigationStack {
        &self.stack
    }

    /// Apply an auth signal value
    ///
    /// Returns `true` if the flow changed. Repeating the current value does
    /// nothing.
    pub fn on_auth_changed(&self, is_authenticated: bool) -> bool {
        let next = RootFlow::from_auth(is_authenticated);
        let previous = self.flow();
        if next == previous {
            return false;
        }

        tracing::info!(from = ?previous, to = ?next, "root flow changed");
        self.rebuild(next);
        self.flow_tx.send_replace(next);
        true
    }

    /// Follow an auth signal until its sender goes away
    ///
    /// The signal's current value is applied first.
    pub async fn run(self, mut auth: watch::Receiver<AuthSnapshot>) -> Self {
        let is_authenticated = auth.borrow_and_update().is_authenticated;
        self.on_auth_changed(is_authenticated);

        while auth.changed().await.is_ok() {
            let is_authenticated = auth.borrow_and_update().is_authenticated;
            self.on_auth_changed(is_authenticated);
        }

        tracing::debug!("auth signal closed, root flow selector stopped");
        self
    }

    fn rebuild(&self, flow: RootFlow) {
        let entry = match flow {
            RootFlow::Authenticated => self.home.clone(),
            RootFlow::Unauthenticated => self.login.clone(),
        };

        let mut stack = self.stack.write();
        stack.reset();
        stack.push(entry);
    }
}
