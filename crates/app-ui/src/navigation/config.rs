//! Navigation configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::destination::Destination;

/// Default cap on the navigation history log
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Largest accepted history cap
pub const MAX_HISTORY_LIMIT: usize = 10_000;

/// Default time the navigating flag stays raised after an operation
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Default deep link scheme
pub const DEFAULT_SCHEME: &str = "app";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// History limit of zero
    #[error("History limit must be greater than zero")]
    ZeroHistoryLimit,

    /// History limit above [`MAX_HISTORY_LIMIT`]
    #[error("History limit {0} exceeds the maximum of {max}", max = MAX_HISTORY_LIMIT)]
    HistoryLimitTooLarge(usize),

    /// Deep link scheme is not a valid URL scheme
    #[error("Invalid deep link scheme: {0:?}")]
    InvalidScheme(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Navigation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationConfig {
    /// Maximum number of history entries kept
    pub history_limit: usize,
    /// How long the navigating flag stays raised, in milliseconds
    pub debounce_ms: u64,
    /// Destination shown when signed in and after a reset
    pub home: Destination,
    /// Destination shown when signed out
    pub login: Destination,
    /// Scheme used for generated deep links
    pub scheme: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            home: Destination::Dashboard,
            login: Destination::Login,
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl NavigationConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a JSON configuration
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the history cap
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set the navigating flag debounce
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = debounce.as_millis() as u64;
        self
    }

    /// Set the home destination
    pub fn home(mut self, home: Destination) -> Self {
        self.home = home;
        self
    }

    /// Set the login destination
    pub fn login(mut self, login: Destination) -> Self {
        self.login = login;
        self
    }

    /// Set the deep link scheme
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Navigating flag debounce as a duration
    pub fn debounce_duration(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check the configuration for values the navigation core cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        if self.history_limit > MAX_HISTORY_LIMIT {
            return Err(ConfigError::HistoryLimitTooLarge(self.history_limit));
        }

        // RFC 3986: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
        let mut chars = self.scheme.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid {
            return Err(ConfigError::InvalidScheme(self.scheme.clone()));
        }

        Ok(())
    }
}
