//! Error types for the observation crate.
//!
//! The begin/end tracker itself never fails; these errors come from the
//! collaborators around it (property bags, the listener registry, filter
//! construction, configuration and logging setup).

use std::collections::HashMap;
use thiserror::Error;

/// The main error type for observation operations.
#[derive(Debug, Error)]
pub enum ObservationError {
    /// A read-only property was overwritten.
    #[error("{0}")]
    ReadOnlyProperty(#[from] ReadOnlyPropertyError),

    /// A listener with the same name is already registered.
    #[error("{0}")]
    DuplicateListener(#[from] DuplicateListenerError),

    /// An event filter could not be built.
    #[error("{0}")]
    InvalidFilter(#[from] InvalidFilterError),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The logging subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(String),
}

impl ObservationError {
    /// Converts the error to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let kind = match self {
            Self::ReadOnlyProperty(_) => "ReadOnlyProperty",
            Self::DuplicateListener(_) => "DuplicateListener",
            Self::InvalidFilter(_) => "InvalidFilter",
            Self::Config(_) => "Config",
            Self::Logging(_) => "Logging",
        };

        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!(kind));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

impl From<serde_json::Error> for ObservationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Error raised when writing over a property declared read-only.
#[derive(Debug, Clone, Error)]
#[error("Property '{key}' is read-only")]
pub struct ReadOnlyPropertyError {
    /// The protected key.
    pub key: String,
}

impl ReadOnlyPropertyError {
    /// Creates a new read-only property error.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Error raised when registering a second listener under an existing name.
#[derive(Debug, Clone, Error)]
#[error("Listener '{name}' is already registered")]
pub struct DuplicateListenerError {
    /// The listener name.
    pub name: String,
}

impl DuplicateListenerError {
    /// Creates a new duplicate listener error.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Error raised when a regex event filter does not compile.
#[derive(Debug, Clone, Error)]
#[error("Invalid event filter pattern '{pattern}': {reason}")]
pub struct InvalidFilterError {
    /// The rejected pattern.
    pub pattern: String,
    /// Why the pattern was rejected.
    pub reason: String,
}

impl InvalidFilterError {
    /// Creates a new invalid filter error.
    #[must_use]
    pub fn new(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
