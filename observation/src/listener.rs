//! Event listener trait.

use crate::context::ExecutionContext;
use crate::event::{Event, EventMatcher};

/// Trait for components receiving dispatched events.
///
/// Listeners are registered on an [`ObservationManager`](crate::manager::ObservationManager)
/// under their name and receive every event accepted by one of their matchers.
pub trait EventListener: Send + Sync {
    /// Returns the listener name, unique within a manager.
    fn name(&self) -> &str;

    /// Returns the subscription matchers.
    fn events(&self) -> &[EventMatcher];

    /// Handles a dispatched event.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The execution context of the dispatching request, if any
    /// * `event` - The dispatched event
    /// * `source` - Opaque source payload
    /// * `data` - Opaque data payload
    fn on_event(
        &self,
        ctx: Option<&ExecutionContext>,
        event: &Event,
        source: Option<&serde_json::Value>,
        data: Option<&serde_json::Value>,
    );

    /// Returns true if one of the matchers accepts the event.
    fn accepts(&self, event: &Event) -> bool {
        self.events().iter().any(|m| m.matches(event))
    }
}
