//! Recording listener for tests.

use crate::context::ExecutionContext;
use crate::event::{Event, EventMatcher, EventRole};
use crate::listener::EventListener;
use parking_lot::Mutex;
use uuid::Uuid;

/// One event received by a [`RecordingListener`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    /// The received event.
    pub event: Event,
    /// Identifier of the dispatching context, if any.
    pub context_id: Option<Uuid>,
    /// Depth of the context event stack when received.
    pub depth: usize,
    /// Source payload.
    pub source: Option<serde_json::Value>,
    /// Data payload.
    pub data: Option<serde_json::Value>,
}

/// A listener that records every event it receives.
#[derive(Debug)]
pub struct RecordingListener {
    name: String,
    events: Vec<EventMatcher>,
    received: Mutex<Vec<RecordedEvent>>,
}

impl RecordingListener {
    /// Creates a recording listener subscribed to every event.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_matchers(name, vec![EventMatcher::All])
    }

    /// Creates a recording listener with explicit matchers.
    #[must_use]
    pub fn with_matchers(name: impl Into<String>, events: Vec<EventMatcher>) -> Self {
        Self {
            name: name.into(),
            events,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Returns all recorded events.
    #[must_use]
    pub fn received(&self) -> Vec<RecordedEvent> {
        self.received.lock().clone()
    }

    /// Returns recorded events with the given role.
    #[must_use]
    pub fn received_with_role(&self, role: EventRole) -> Vec<RecordedEvent> {
        self.received
            .lock()
            .iter()
            .filter(|r| r.event.role() == role)
            .cloned()
            .collect()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.received.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.received.lock().is_empty()
    }

    /// Clears recorded events.
    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

impl EventListener for RecordingListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn events(&self) -> &[EventMatcher] {
        &self.events
    }

    fn on_event(
        &self,
        ctx: Option<&ExecutionContext>,
        event: &Event,
        source: Option<&serde_json::Value>,
        data: Option<&serde_json::Value>,
    ) {
        self.received.lock().push(RecordedEvent {
            event: event.clone(),
            context_id: ctx.map(ExecutionContext::id),
            depth: ctx.map_or(0, ExecutionContext::event_depth),
            source: source.cloned(),
            data: data.cloned(),
        });
    }
}
