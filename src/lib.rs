//! Ascend application shell
//!
//! Wires the navigation core to its collaborators: the auth state store, the
//! telemetry sink and the deep link entry point. Hosts construct one
//! [`AppShell`] per app session.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::Arc;

use app_state::auth::AuthStateProvider;
use app_ui::navigation::{
    ConfigError, DeepLinkCodec, Destination, NavigationConfig, NavigationSnapshot,
    NavigationStack, NavigatorView, RootFlow, RootFlowSelector, SharedNavigationStack,
    TelemetrySink, TracingSink, ViewHandle, ViewResolver,
};
use tokio::task::JoinHandle;

pub use app_state;
pub use app_ui;

/// Install the `tracing` subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`. Calling it again is harmless.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// One app session: navigation state plus its collaborators
pub struct AppShell {
    stack: SharedNavigationStack,
    selector: RootFlowSelector,
    codec: DeepLinkCodec,
    auth: Arc<dyn AuthStateProvider>,
}

impl AppShell {
    /// Build a session reporting navigation to the `tracing` log
    pub fn new(
        config: NavigationConfig,
        auth: Arc<dyn AuthStateProvider>,
    ) -> Result<Self, ConfigError> {
        Self::with_telemetry(config, auth, Arc::new(TracingSink))
    }

    /// Build a session reporting navigation to `telemetry`
    pub fn with_telemetry(
        config: NavigationConfig,
        auth: Arc<dyn AuthStateProvider>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let stack = NavigationStack::new(&config)
            .with_telemetry(telemetry)
            .into_shared();
        let selector =
            RootFlowSelector::mount(Arc::clone(&stack), &config, auth.snapshot().is_authenticated);

        Ok(Self {
            stack,
            selector,
            codec: DeepLinkCodec::new(config.scheme),
            auth,
        })
    }

    /// Follow the auth store on the current tokio runtime
    ///
    /// The task ends when the auth store's sender is dropped.
    pub fn listen_for_auth_changes(&self) -> JoinHandle<RootFlowSelector> {
        tokio::spawn(self.selector.clone().run(self.auth.subscribe()))
    }

    /// Current root flow
    pub fn flow(&self) -> RootFlow {
        self.selector.flow()
    }

    /// Root flow selector driving this session
    pub fn selector(&self) -> &RootFlowSelector {
        &self.selector
    }

    /// Navigation stack of this session
    pub fn stack(&self) -> &SharedNavigationStack {
        &self.stack
    }

    /// Push a destination
    pub fn navigate(&self, destination: Destination) {
        self.stack.write().push(destination);
    }

    /// Go back one screen
    pub fn back(&self) -> Option<Destination> {
        self.stack.write().pop()
    }

    /// Open an external link
    ///
    /// Returns `false` if the link does not decode, or if it needs a signed-in
    /// user and nobody is signed in. Nothing is navigated in either case.
    pub fn open_link(&self, link: &str) -> bool {
        let Some(destination) = self.codec.decode(link) else {
            return false;
        };

        if destination.requires_auth() && !self.auth.snapshot().is_authenticated {
            tracing::info!(?destination, "deep link needs a signed-in user, ignored");
            return false;
        }

        self.navigate(destination);
        true
    }

    /// External link for a destination, if it has one
    pub fn share_link(&self, destination: &Destination) -> Option<String> {
        self.codec.encode(destination).map(|url| url.to_string())
    }

    /// Resolver bound to this session's stack and current auth state
    pub fn resolver(&self) -> ViewResolver {
        ViewResolver::new(NavigatorView::new(Arc::clone(&self.stack)), self.auth.snapshot())
    }

    /// Screen for the displayed destination
    pub fn current_view(&self) -> Option<ViewHandle> {
        self.resolver().resolve_current()
    }

    /// Read-only summary for telemetry
    pub fn snapshot(&self) -> NavigationSnapshot {
        self.stack.read().snapshot()
    }
}
