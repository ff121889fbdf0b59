//! Navigation stack
//!
//! The stack owns the path the UI renders, the current destination, and a
//! bounded log of every destination visited this session. It is mutated only
//! through [`push`](NavigationStack::push), [`pop`](NavigationStack::pop),
//! [`pop_to`](NavigationStack::pop_to), [`replace`](NavigationStack::replace)
//! and [`reset`](NavigationStack::reset), and reports each change to
//! subscribers.
//!
//! The path is tracked as its own list. It is never rebuilt from the history
//! log, so history eviction cannot drop entries that are still on the path.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use uuid::Uuid;

use super::config::{NavigationConfig, DEFAULT_HISTORY_LIMIT};
use super::destination::{Destination, APP_NAME};
use super::telemetry::{NavigationEvent, NavigationSnapshot, TelemetrySink};

/// Capacity of the change event channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Navigation stack shared between the root flow and the screens
///
/// The stack itself assumes serialized access; hosts that touch it from more
/// than one thread go through this lock.
pub type SharedNavigationStack = Arc<RwLock<NavigationStack>>;

/// Navigation stack and history for one app session
pub struct NavigationStack {
    /// Destinations between the root and the displayed screen
    path: Vec<Destination>,
    /// Displayed destination; `None` only before the first navigation
    current: Option<Destination>,
    /// Visited destinations, oldest first
    history: VecDeque<Destination>,
    history_limit: usize,
    /// Destination shown after a reset
    home: Destination,
    session_id: Uuid,
    /// Raised during an operation, lowered after the debounce
    is_navigating: Arc<AtomicBool>,
    debounce: Duration,
    events_tx: broadcast::Sender<NavigationEvent>,
    snapshot_tx: watch::Sender<NavigationSnapshot>,
    telemetry: Option<Arc<dyn TelemetrySink>>,
}

impl NavigationStack {
    /// Create an empty stack
    ///
    /// History space is reserved up to the default limit and grows as
    /// entries arrive.
    pub fn new(config: &NavigationConfig) -> Self {
        let history_limit = config.history_limit.max(1);
        let session_id = Uuid::new_v4();
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (snapshot_tx, _) = watch::channel(NavigationSnapshot {
            current_title: APP_NAME.to_string(),
            current_area: None,
            path_depth: 0,
            can_go_back: false,
            history_count: 0,
            session_id,
            captured_at: Utc::now(),
        });

        tracing::debug!(session = %session_id, "navigation session started");

        Self {
            path: Vec::new(),
            current: None,
            history: VecDeque::with_capacity(history_limit.min(DEFAULT_HISTORY_LIMIT)),
            history_limit,
            home: config.home.clone(),
            session_id,
            is_navigating: Arc::new(AtomicBool::new(false)),
            debounce: config.debounce_duration(),
            events_tx,
            snapshot_tx,
            telemetry: None,
        }
    }

    /// Report every change to a telemetry sink
    pub fn with_telemetry(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = Some(sink);
        self
    }

    /// Wrap the stack for sharing
    pub fn into_shared(self) -> SharedNavigationStack {
        Arc::new(RwLock::new(self))
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Push a destination
    pub fn push(&mut self, destination: Destination) {
        self.mark_navigating();
        self.push_inner(destination.clone());
        self.publish(NavigationEvent::Pushed { destination });
    }

    /// Pop the top destination
    ///
    /// Returns the removed destination, or `None` (and changes nothing) if the
    /// path is empty.
    pub fn pop(&mut self) -> Option<Destination> {
        if self.path.is_empty() {
            tracing::trace!("pop on empty path ignored");
            return None;
        }

        self.mark_navigating();
        let popped = self.pop_inner()?;
        self.publish(NavigationEvent::Popped {
            destination: popped.clone(),
        });
        Some(popped)
    }

    /// Clear the path and show the home destination
    pub fn reset(&mut self) {
        self.mark_navigating();
        self.path.clear();
        self.current = Some(self.home.clone());
        self.publish(NavigationEvent::Reset);
    }

    /// Pop everything above the last occurrence of `destination`
    ///
    /// Returns `false` (and changes nothing) if the destination is not on the
    /// path.
    pub fn pop_to(&mut self, destination: &Destination) -> bool {
        let Some(index) = self.path.iter().rposition(|d| d == destination) else {
            tracing::trace!(?destination, "pop_to target not on path");
            return false;
        };

        self.mark_navigating();
        self.path.truncate(index + 1);
        self.current = Some(destination.clone());
        self.publish(NavigationEvent::PoppedTo {
            destination: destination.clone(),
        });
        true
    }

    /// Replace the top destination, or push if the path is empty
    pub fn replace(&mut self, destination: Destination) {
        self.mark_navigating();
        let previous = self.pop_inner();
        self.push_inner(destination.clone());
        self.publish(NavigationEvent::Replaced {
            previous,
            destination,
        });
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Destinations on the path, root first
    pub fn path(&self) -> &[Destination] {
        &self.path
    }

    /// Displayed destination
    pub fn current(&self) -> Option<&Destination> {
        self.current.as_ref()
    }

    /// Visited destinations, oldest first
    pub fn history(&self) -> impl Iterator<Item = &Destination> {
        self.history.iter()
    }

    /// Number of history entries retained
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Maximum number of history entries retained
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Number of destinations on the path
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.path.is_empty()
    }

    /// Check if a destination is on the path
    pub fn contains(&self, destination: &Destination) -> bool {
        self.path.contains(destination)
    }

    /// Destination shown after a reset
    pub fn home(&self) -> &Destination {
        &self.home
    }

    /// Navigation session identifier
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Whether a navigation happened within the debounce window
    pub fn is_navigating(&self) -> bool {
        self.is_navigating.load(Ordering::SeqCst)
    }

    /// Read-only summary for telemetry
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            current_title: self
                .current
                .as_ref()
                .map_or(APP_NAME, Destination::title)
                .to_string(),
            current_area: self.current.as_ref().map(Destination::feature_area),
            path_depth: self.path.len(),
            can_go_back: self.can_go_back(),
            history_count: self.history.len(),
            session_id: self.session_id,
            captured_at: Utc::now(),
        }
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events_tx.subscribe()
    }

    /// Watch the latest snapshot
    pub fn watch_snapshot(&self) -> watch::Receiver<NavigationSnapshot> {
        self.snapshot_tx.subscribe()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn push_inner(&mut self, destination: Destination) {
        self.path.push(destination.clone());
        self.history.push_back(destination.clone());
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
        self.current = Some(destination);
    }

    fn pop_inner(&mut self) -> Option<Destination> {
        let popped = self.path.pop()?;
        self.current = Some(self.path.last().unwrap_or(&self.home).clone());
        Some(popped)
    }

    /// Raise the navigating flag and schedule it to drop after the debounce
    ///
    /// A later operation may be lowered early by an earlier timer; the flag
    /// only drives presentation. If the timer task fails (e.g. a runtime
    /// without the time driver), the flag drops as soon as the failure is seen.
    fn mark_navigating(&self) {
        self.is_navigating.store(true, Ordering::SeqCst);

        let flag = Arc::clone(&self.is_navigating);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let debounce = self.debounce;
                let timer_flag = Arc::clone(&flag);
                let timer = handle.spawn(async move {
                    tokio::time::sleep(debounce).await;
                    timer_flag.store(false, Ordering::SeqCst);
                });
                handle.spawn(async move {
                    if let Err(e) = timer.await {
                        tracing::debug!("navigating flag timer failed: {}", e);
                        flag.store(false, Ordering::SeqCst);
                    }
                });
            }
            Err(_) => flag.store(false, Ordering::SeqCst),
        }
    }

    fn publish(&self, event: NavigationEvent) {
        let snapshot = self.snapshot();
        tracing::trace!(
            ?event,
            depth = snapshot.path_depth,
            history = snapshot.history_count,
            "navigation changed"
        );

        if let Some(sink) = &self.telemetry {
            sink.record(&event, &snapshot);
        }

        self.snapshot_tx.send_replace(snapshot);
        // No subscribers is fine
        let _ = self.events_tx.send(event);
    }
}

impl fmt::Debug for NavigationStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationStack")
            .field("path", &self.path)
            .field("current", &self.current)
            .field("history_len", &self.history.len())
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Read-only View
// =============================================================================

/// Read-only access to a shared navigation stack
///
/// Handed to screens so they can render back affordances and breadcrumbs
/// without being able to navigate by themselves.
#[derive(Clone)]
pub struct NavigatorView {
    stack: SharedNavigationStack,
}

impl NavigatorView {
    /// Create a view over a shared stack
    pub fn new(stack: SharedNavigationStack) -> Self {
        Self { stack }
    }

    /// Displayed destination
    pub fn current(&self) -> Option<Destination> {
        self.stack.read().current().cloned()
    }

    /// Destinations on the path, root first
    pub fn path(&self) -> Vec<Destination> {
        self.stack.read().path().to_vec()
    }

    /// Number of destinations on the path
    pub fn depth(&self) -> usize {
        self.stack.read().depth()
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.stack.read().can_go_back()
    }

    /// Whether a navigation happened within the debounce window
    pub fn is_navigating(&self) -> bool {
        self.stack.read().is_navigating()
    }

    /// Read-only summary for telemetry
    pub fn snapshot(&self) -> NavigationSnapshot {
        self.stack.read().snapshot()
    }

    /// Check if two views observe the same stack
    pub fn same_stack(&self, other: &NavigatorView) -> bool {
        Arc::ptr_eq(&self.stack, &other.stack)
    }
}

impl fmt::Debug for NavigatorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorView")
            .field("depth", &self.depth())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::telemetry::MockTelemetrySink;

    fn stack() -> NavigationStack {
        NavigationStack::new(&NavigationConfig::default())
    }

    fn profile(id: &str) -> Destination {
        Destination::Profile {
            user_id: id.to_string(),
        }
    }

    fn goal(id: usize) -> Destination {
        Destination::GoalDetail {
            goal_id: format!("g{}", id),
        }
    }

    fn assert_consistent(stack: &NavigationStack) {
        assert_eq!(stack.can_go_back(), !stack.path().is_empty());
        assert!(stack.history_len() <= stack.history_limit());
    }

    #[test]
    fn test_new_stack_is_empty() {
        let stack = stack();
        assert!(stack.path().is_empty());
        assert!(stack.current().is_none());
        assert!(!stack.can_go_back());
        assert_eq!(stack.history_len(), 0);
        assert!(!stack.is_navigating());
    }

    #[test]
    fn test_push() {
        let mut stack = stack();
        let destinations = [Destination::Dashboard, profile("u1"), Destination::Reports];

        for (i, destination) in destinations.iter().enumerate() {
            stack.push(destination.clone());
            assert_eq!(stack.depth(), i + 1);
            assert_eq!(stack.current(), Some(destination));
            assert_consistent(&stack);
        }
        assert_eq!(stack.path(), &destinations);
    }

    #[test]
    fn test_pop() {
        let mut stack = stack();
        stack.push(Destination::Dashboard);
        stack.push(profile("u1"));

        assert_eq!(stack.pop(), Some(profile("u1")));
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Some(&Destination::Dashboard));
        assert_consistent(&stack);
    }

    #[test]
    fn test_pop_last_shows_home() {
        let mut stack = stack();
        stack.push(Destination::Reports);

        assert_eq!(stack.pop(), Some(Destination::Reports));
        assert!(!stack.can_go_back());
        assert_eq!(stack.current(), Some(&Destination::Dashboard));
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut stack = stack();
        let mut rx = stack.subscribe();

        assert_eq!(stack.pop(), None);
        assert!(stack.current().is_none());
        assert_eq!(stack.history_len(), 0);
        assert!(rx.try_recv().is_err());

        stack.push(Destination::Dashboard);
        stack.pop();
        let before = (stack.path().to_vec(), stack.current().cloned(), stack.history_len());
        assert_eq!(stack.pop(), None);
        assert_eq!(
            before,
            (stack.path().to_vec(), stack.current().cloned(), stack.history_len())
        );
    }

    #[test]
    fn test_reset() {
        let mut stack = stack();
        stack.reset();
        assert!(stack.path().is_empty());
        assert_eq!(stack.current(), Some(&Destination::Dashboard));

        stack.push(profile("u1"));
        stack.push(Destination::Settings);
        stack.reset();
        assert!(stack.path().is_empty());
        assert_eq!(stack.current(), Some(&Destination::Dashboard));
        assert_eq!(stack.history_len(), 2);
        assert_consistent(&stack);
    }

    #[test]
    fn test_reset_uses_configured_home() {
        let config = NavigationConfig::default().home(Destination::CareerGoals);
        let mut stack = NavigationStack::new(&config);
        stack.reset();
        assert_eq!(stack.current(), Some(&Destination::CareerGoals));
    }

    #[test]
    fn test_pop_to() {
        let mut stack = stack();
        stack.push(Destination::Dashboard);
        stack.push(profile("u1"));
        stack.push(Destination::Reports);

        assert!(stack.pop_to(&profile("u1")));
        assert_eq!(stack.path(), &[Destination::Dashboard, profile("u1")]);
        assert_eq!(stack.current(), Some(&profile("u1")));
        assert_consistent(&stack);
    }

    #[test]
    fn test_pop_to_uses_last_occurrence() {
        let mut stack = stack();
        stack.push(Destination::Dashboard);
        stack.push(Destination::Reports);
        stack.push(Destination::Dashboard);
        stack.push(Destination::Settings);

        assert!(stack.pop_to(&Destination::Dashboard));
        assert_eq!(stack.depth(), 3);
    }

    #[test]
    fn test_pop_to_missing_is_noop() {
        let mut stack = stack();
        stack.push(Destination::Dashboard);
        stack.push(profile("u1"));

        assert!(!stack.pop_to(&profile("u2")));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.current(), Some(&profile("u1")));
    }

    #[test]
    fn test_replace() {
        let mut stack = stack();
        stack.push(Destination::Dashboard);
        stack.push(profile("u1"));

        stack.replace(profile("u2"));
        assert_eq!(stack.path(), &[Destination::Dashboard, profile("u2")]);
        assert_eq!(stack.current(), Some(&profile("u2")));
        assert_eq!(stack.history_len(), 3);
    }

    #[test]
    fn test_replace_on_empty_pushes() {
        let mut stack = stack();
        stack.replace(Destination::Reports);
        assert_eq!(stack.path(), &[Destination::Reports]);
        assert_eq!(stack.current(), Some(&Destination::Reports));
    }

    #[test]
    fn test_history_cap() {
        let mut stack = stack();
        for i in 0..60 {
            stack.push(goal(i));
            assert_consistent(&stack);
        }

        assert_eq!(stack.history_len(), 50);
        let expected: Vec<_> = (10..60).map(goal).collect();
        assert_eq!(stack.history().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_oversized_history_limit() {
        let mut stack = NavigationStack::new(&NavigationConfig::default().history_limit(usize::MAX));
        assert_eq!(stack.history_limit(), usize::MAX);

        for i in 0..60 {
            stack.push(goal(i));
        }
        assert_eq!(stack.history_len(), 60);
    }

    #[test]
    fn test_deep_path_survives_history_eviction() {
        let mut stack = NavigationStack::new(&NavigationConfig::default().history_limit(5));
        for i in 0..20 {
            stack.push(goal(i));
        }

        assert_eq!(stack.depth(), 20);
        assert!(stack.pop_to(&goal(2)));
        assert_eq!(stack.path(), &[goal(0), goal(1), goal(2)]);
    }

    #[test]
    fn test_events() {
        let mut stack = stack();
        let mut rx = stack.subscribe();

        stack.push(Destination::Dashboard);
        stack.replace(Destination::Reports);
        stack.pop();
        stack.reset();

        assert_eq!(
            rx.try_recv().unwrap(),
            NavigationEvent::Pushed {
                destination: Destination::Dashboard
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            NavigationEvent::Replaced {
                previous: Some(Destination::Dashboard),
                destination: Destination::Reports
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            NavigationEvent::Popped {
                destination: Destination::Reports
            }
        );
        assert_eq!(rx.try_recv().unwrap(), NavigationEvent::Reset);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_snapshot() {
        let mut stack = stack();
        let initial = stack.snapshot();
        assert_eq!(initial.current_title, APP_NAME);
        assert_eq!(initial.path_depth, 0);

        stack.push(Destination::Dashboard);
        stack.push(Destination::Leaderboard);

        let snapshot = stack.snapshot();
        assert_eq!(snapshot.current_title, "Leaderboard");
        assert_eq!(snapshot.path_depth, 2);
        assert!(snapshot.can_go_back);
        assert_eq!(snapshot.history_count, 2);
        assert_eq!(snapshot.session_id, stack.session_id());

        let watched = stack.watch_snapshot();
        assert_eq!(watched.borrow().path_depth, 2);
    }

    #[test]
    fn test_telemetry_receives_every_change() {
        let mut sink = MockTelemetrySink::new();
        sink.expect_record()
            .withf(|event, snapshot| {
                matches!(event, NavigationEvent::Pushed { .. }) && snapshot.path_depth == 1
            })
            .times(1)
            .return_const(());
        sink.expect_record()
            .withf(|event, snapshot| {
                *event == NavigationEvent::Reset && snapshot.current_title == "Dashboard"
            })
            .times(1)
            .return_const(());

        let mut stack = stack().with_telemetry(Arc::new(sink));
        stack.push(Destination::Achievements);
        stack.pop_to(&Destination::Settings);
        stack.reset();
    }

    #[test]
    fn test_navigating_flag_without_runtime() {
        let mut stack = stack();
        stack.push(Destination::Dashboard);
        assert!(!stack.is_navigating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigating_flag_debounce() {
        let mut stack = stack();
        stack.push(Destination::Dashboard);
        assert!(stack.is_navigating());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(stack.is_navigating());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!stack.is_navigating());
    }

    #[test]
    fn test_navigating_flag_without_time_driver() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        runtime.block_on(async {
            let mut stack = stack();
            stack.push(Destination::Dashboard);
            assert!(stack.is_navigating());

            for _ in 0..10 {
                if !stack.is_navigating() {
                    break;
                }
                tokio::task::yield_now().await;
            }
            assert!(!stack.is_navigating());
        });
    }

    #[test]
    fn test_navigator_view() {
        let shared = stack().into_shared();
        let view = NavigatorView::new(Arc::clone(&shared));

        shared.write().push(Destination::Dashboard);
        shared.write().push(profile("u1"));

        assert_eq!(view.depth(), 2);
        assert!(view.can_go_back());
        assert_eq!(view.current(), Some(profile("u1")));
        assert_eq!(view.path(), vec![Destination::Dashboard, profile("u1")]);
        assert!(view.same_stack(&view.clone()));
    }
}
