//! Navigation telemetry export

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::destination::{Destination, FeatureArea};

/// A change applied to the navigation stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    /// A destination was pushed
    Pushed {
        /// Pushed destination
        destination: Destination,
    },
    /// The top destination was popped
    Popped {
        /// Removed destination
        destination: Destination,
    },
    /// Everything above a destination was popped
    PoppedTo {
        /// Destination now on top
        destination: Destination,
    },
    /// The top destination was replaced
    Replaced {
        /// Removed destination, if the path was not empty
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<Destination>,
        /// Destination now on top
        destination: Destination,
    },
    /// The path was cleared
    Reset,
}

/// Read-only summary of the navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSnapshot {
    /// Title of the current destination
    pub current_title: String,
    /// Feature area of the current destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_area: Option<FeatureArea>,
    /// Number of destinations on the path
    pub path_depth: usize,
    /// Whether back navigation is possible
    pub can_go_back: bool,
    /// Number of history entries retained
    pub history_count: usize,
    /// Navigation session this snapshot belongs to
    pub session_id: Uuid,
    /// When the snapshot was taken
    pub captured_at: DateTime<Utc>,
}

impl NavigationSnapshot {
    /// Serialize for a telemetry transport
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Consumer of navigation telemetry
///
/// Receives every change together with the state it produced.
#[cfg_attr(test, mockall::automock)]
pub trait TelemetrySink: Send + Sync {
    /// Record a navigation change
    fn record(&self, event: &NavigationEvent, snapshot: &NavigationSnapshot);
}

/// Sink that writes navigation changes to the `tracing` log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn record(&self, event: &NavigationEvent, snapshot: &NavigationSnapshot) {
        tracing::info!(
            session = %snapshot.session_id,
            screen = %snapshot.current_title,
            depth = snapshot.path_depth,
            history = snapshot.history_count,
            ?event,
            "navigation"
        );
    }
}
