//! Screen data loading
//!
//! Every data-backed screen runs the same small state machine: it starts idle,
//! moves to loading when it asks its data source for content, and ends up
//! either loaded or failed. A failed screen stays failed until the user
//! retries. Screens do not coordinate with each other.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;
use tokio::sync::watch;

/// Load errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Remote fetch failed
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not allowed to see the data
    #[error("Not authorized")]
    Unauthorized,
}

/// Result type for load operations
pub type Result<T> = std::result::Result<T, LoadError>;

/// Where a screen gets its data from
#[cfg_attr(test, mockall::automock(type Output = u32;))]
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Data produced by a successful fetch
    type Output: Clone + Send + Sync + 'static;

    /// Fetch the screen's data
    async fn fetch(&self) -> Result<Self::Output>;
}

/// Load state of a screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Fetch succeeded
    Loaded(T),
    /// Fetch failed; message is shown inline next to a retry action
    Failed(String),
}

impl<T> LoadState<T> {
    /// Check if a fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Check if the last fetch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    /// Loaded data, if any
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Error message, if the last fetch failed
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Drives the load state machine for one screen
///
/// # Example
///
/// ```no_run
/// use app_state::load::{DataSource, LoadState, Result, ScreenLoader};
/// use async_trait::async_trait;
///
/// struct Goals;
///
/// #[async_trait]
/// impl DataSource for Goals {
///     type Output = Vec<String>;
///
///     async fn fetch(&self) -> Result<Self::Output> {
///         Ok(vec!["Ship the Q3 review".to_string()])
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let loader = ScreenLoader::new("career_goals", Goals);
///     let state = loader.load().await;
///     assert!(matches!(state, LoadState::Loaded(_)));
/// }
/// ```
pub struct ScreenLoader<S: DataSource> {
    label: String,
    source: S,
    state_tx: watch::Sender<LoadState<S::Output>>,
    attempts: AtomicU32,
}

impl<S: DataSource> ScreenLoader<S> {
    /// Create an idle loader
    pub fn new(label: impl Into<String>, source: S) -> Self {
        let (state_tx, _) = watch::channel(LoadState::Idle);
        Self {
            label: label.into(),
            source,
            state_tx,
            attempts: AtomicU32::new(0),
        }
    }

    /// Current state
    pub fn state(&self) -> LoadState<S::Output> {
        self.state_tx.borrow().clone()
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<LoadState<S::Output>> {
        self.state_tx.subscribe()
    }

    /// Number of fetches started so far
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Fetch the screen's data
    ///
    /// Returns the resulting state. Calling this while a fetch is already in
    /// flight returns the current state without starting another one.
    pub async fn load(&self) -> LoadState<S::Output> {
        let started = self.state_tx.send_if_modified(|state| {
            if state.is_loading() {
                false
            } else {
                *state = LoadState::Loading;
                true
            }
        });
        if !started {
            tracing::trace!(screen = %self.label, "load already in flight");
            return LoadState::Loading;
        }

        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        let next = match self.source.fetch().await {
            Ok(data) => LoadState::Loaded(data),
            Err(e) => {
                tracing::warn!(screen = %self.label, attempt, "Failed to load screen data: {}", e);
                LoadState::Failed(e.to_string())
            }
        };

        self.state_tx.send_replace(next.clone());
        next
    }

    /// Retry after a failure
    ///
    /// Only acts from the failed state; otherwise the current state is returned.
    pub async fn retry(&self) -> LoadState<S::Output> {
        if !self.state_tx.borrow().is_failed() {
            return self.state();
        }
        self.load().await
    }

    /// Drop any loaded data and go back to idle
    pub fn reset(&self) {
        self.state_tx.send_replace(LoadState::Idle);
    }
}
