//! Event filters used to refine event matching.

use crate::errors::InvalidFilterError;
use regex::Regex;
use std::fmt;

/// Textual value of a filter that matches everything.
pub const ALWAYS_MATCHING_FILTER: &str = ".*";

/// A filter attached to an event descriptor.
///
/// A filter on the *pattern* side is matched against the filter of the
/// *observed* event, using the textual value of the latter.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Matches any other filter.
    #[default]
    Always,
    /// Matches filters whose textual value equals the name.
    Fixed(String),
    /// Matches filters whose textual value fully matches the pattern.
    Regex(RegexFilter),
}

impl EventFilter {
    /// Creates a fixed-name filter.
    #[must_use]
    pub fn fixed(name: impl Into<String>) -> Self {
        Self::Fixed(name.into())
    }

    /// Creates a regex filter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterError` if the pattern does not compile.
    pub fn regex(pattern: impl Into<String>) -> Result<Self, InvalidFilterError> {
        RegexFilter::new(pattern).map(Self::Regex)
    }

    /// Returns the textual value of the filter.
    #[must_use]
    pub fn filter(&self) -> &str {
        match self {
            Self::Always => ALWAYS_MATCHING_FILTER,
            Self::Fixed(name) => name,
            Self::Regex(regex) => regex.pattern(),
        }
    }

    /// Returns true if this filter accepts the other filter.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        match self {
            Self::Always => true,
            Self::Fixed(name) => name == other.filter(),
            Self::Regex(regex) => regex.is_match(other.filter()),
        }
    }

    /// Returns true for the always-matching filter.
    #[must_use]
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }
}

impl PartialEq for EventFilter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Always, Self::Always) => true,
            (Self::Fixed(a), Self::Fixed(b)) => a == b,
            (Self::Regex(a), Self::Regex(b)) => a.pattern() == b.pattern(),
            _ => false,
        }
    }
}

impl Eq for EventFilter {}

impl fmt::Display for EventFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filter())
    }
}

/// A compiled regular expression filter.
///
/// The pattern is anchored at both ends, so it must match the whole
/// textual value of the observed filter.
#[derive(Debug, Clone)]
pub struct RegexFilter {
    pattern: String,
    regex: Regex,
}

impl RegexFilter {
    /// Compiles a new regex filter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterError` if the pattern does not compile.
    pub fn new(pattern: impl Into<String>) -> Result<Self, InvalidFilterError> {
        let pattern = pattern.into();
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| InvalidFilterError::new(&pattern, e.to_string()))?;

        Ok(Self { pattern, regex })
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the value fully matches the pattern.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}
