//! Event descriptors, roles and subscription matchers.

use super::EventFilter;
use std::fmt;

/// The type and filter shared by every event role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDescriptor {
    event_type: String,
    filter: EventFilter,
}

impl EventDescriptor {
    /// Creates a descriptor with an always-matching filter.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            filter: EventFilter::Always,
        }
    }

    /// Creates a descriptor with a fixed-name filter.
    #[must_use]
    pub fn named(event_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(event_type).with_filter(EventFilter::fixed(name))
    }

    /// Sets the filter.
    #[must_use]
    pub fn with_filter(mut self, filter: EventFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Returns the event type (e.g., "document.update").
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Returns the filter.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Returns true if `other` has the same type and passes this filter.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.event_type == other.event_type && self.filter.matches(&other.filter)
    }
}

impl fmt::Display for EventDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filter.is_always() {
            write!(f, "{}", self.event_type)
        } else {
            write!(f, "{}[{}]", self.event_type, self.filter)
        }
    }
}

/// An event opening a nestable operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginEvent(EventDescriptor);

impl BeginEvent {
    /// Creates a begin event matching any name.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self(EventDescriptor::new(event_type))
    }

    /// Creates a begin event with a fixed-name filter.
    #[must_use]
    pub fn named(event_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self(EventDescriptor::named(event_type, name))
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &EventDescriptor {
        &self.0
    }

    /// Returns true if this begin event, used as a pattern, matches `other`.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.matches(&other.0)
    }
}

impl From<EventDescriptor> for BeginEvent {
    fn from(descriptor: EventDescriptor) -> Self {
        Self(descriptor)
    }
}

impl fmt::Display for BeginEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// An event closing the most recently opened operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndEvent(EventDescriptor);

impl EndEvent {
    /// Creates an end event matching any name.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        Self(EventDescriptor::new(event_type))
    }

    /// Creates an end event with a fixed-name filter.
    #[must_use]
    pub fn named(event_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self(EventDescriptor::named(event_type, name))
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &EventDescriptor {
        &self.0
    }
}

impl From<EventDescriptor> for EndEvent {
    fn from(descriptor: EventDescriptor) -> Self {
        Self(descriptor)
    }
}

impl fmt::Display for EndEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The role an event plays with respect to nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventRole {
    /// Opens a nestable operation.
    Begin,
    /// Closes the most recently opened operation.
    End,
    /// No nesting meaning.
    Plain,
}

impl EventRole {
    /// Returns the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::End => "end",
            Self::Plain => "plain",
        }
    }
}

impl fmt::Display for EventRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dispatched event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A begin event.
    Begin(BeginEvent),
    /// An end event.
    End(EndEvent),
    /// An event with no nesting meaning.
    Plain(EventDescriptor),
}

impl Event {
    /// Creates a begin event of the given type.
    #[must_use]
    pub fn begin(event_type: impl Into<String>) -> Self {
        Self::Begin(BeginEvent::new(event_type))
    }

    /// Creates an end event of the given type.
    #[must_use]
    pub fn end(event_type: impl Into<String>) -> Self {
        Self::End(EndEvent::new(event_type))
    }

    /// Creates a plain event of the given type.
    #[must_use]
    pub fn plain(event_type: impl Into<String>) -> Self {
        Self::Plain(EventDescriptor::new(event_type))
    }

    /// Returns the role of the event.
    #[must_use]
    pub fn role(&self) -> EventRole {
        match self {
            Self::Begin(_) => EventRole::Begin,
            Self::End(_) => EventRole::End,
            Self::Plain(_) => EventRole::Plain,
        }
    }

    /// Returns the descriptor of the event.
    #[must_use]
    pub fn descriptor(&self) -> &EventDescriptor {
        match self {
            Self::Begin(event) => event.descriptor(),
            Self::End(event) => event.descriptor(),
            Self::Plain(descriptor) => descriptor,
        }
    }

    /// Returns the event type.
    #[must_use]
    pub fn event_type(&self) -> &str {
        self.descriptor().event_type()
    }

    /// Returns true if `other` has the same role and its descriptor is
    /// matched by this one.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.role() == other.role() && self.descriptor().matches(other.descriptor())
    }
}

impl From<BeginEvent> for Event {
    fn from(event: BeginEvent) -> Self {
        Self::Begin(event)
    }
}

impl From<EndEvent> for Event {
    fn from(event: EndEvent) -> Self {
        Self::End(event)
    }
}

impl From<EventDescriptor> for Event {
    fn from(descriptor: EventDescriptor) -> Self {
        Self::Plain(descriptor)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role(), self.descriptor())
    }
}

/// A subscription filter declared by a listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventMatcher {
    /// Accepts every event.
    All,
    /// Accepts events matched by the given event.
    Event(Event),
}

impl EventMatcher {
    /// Returns true if the matcher accepts the event.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::All => true,
            Self::Event(pattern) => pattern.matches(event),
        }
    }
}

impl From<Event> for EventMatcher {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

impl fmt::Display for EventMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Event(event) => fmt::Display::fmt(event, f),
        }
    }
}
