//! Configuration for the observation context tracker.

use crate::errors::ObservationError;
use serde::{Deserialize, Serialize};

/// Default name under which the tracker registers itself.
pub const DEFAULT_LISTENER_NAME: &str = "ObservationContext";

/// Configuration for [`ObservationContext`](crate::tracker::ObservationContext).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationConfig {
    /// Listener name used for registration.
    #[serde(default = "default_listener_name")]
    pub listener_name: String,
    /// Whether end events with no open begin event are logged.
    #[serde(default = "default_log_unbalanced")]
    pub log_unbalanced_end_events: bool,
}

fn default_listener_name() -> String {
    DEFAULT_LISTENER_NAME.to_string()
}

fn default_log_unbalanced() -> bool {
    true
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            listener_name: default_listener_name(),
            log_unbalanced_end_events: default_log_unbalanced(),
        }
    }
}

impl ObservationConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON, defaulting missing fields.
    ///
    /// # Errors
    ///
    /// Returns `ObservationError::Config` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ObservationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the listener name.
    #[must_use]
    pub fn with_listener_name(mut self, name: impl Into<String>) -> Self {
        self.listener_name = name.into();
        self
    }

    /// Enables or disables logging of unbalanced end events.
    #[must_use]
    pub fn with_unbalanced_end_logging(mut self, enabled: bool) -> Self {
        self.log_unbalanced_end_events = enabled;
        self
    }
}
