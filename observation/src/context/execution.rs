//! Per-request execution context.

use super::PropertyBag;
use crate::errors::ObservationError;
use crate::event::BeginEvent;
use parking_lot::Mutex;
use uuid::Uuid;

/// The state carried by one logical request.
///
/// Besides a free-form property bag, the context owns a typed slot holding
/// the stack of currently open begin events. The slot is absent until the
/// first begin event is pushed, and only the observation tracker mutates it.
#[derive(Debug)]
pub struct ExecutionContext {
    /// Unique context identifier.
    id: Uuid,
    /// Free-form properties.
    properties: PropertyBag,
    /// Open begin events, most recent last.
    event_stack: Mutex<Option<Vec<BeginEvent>>>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionContext {
    /// Creates a new execution context with a random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a new execution context with the given identifier.
    #[must_use]
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            properties: PropertyBag::new(),
            event_stack: Mutex::new(None),
        }
    }

    /// Seeds the property bag.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.properties = properties;
        self
    }

    /// Returns the context identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the property bag.
    #[must_use]
    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    /// Gets a property value.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<serde_json::Value> {
        self.properties.get(key)
    }

    /// Sets a property value.
    ///
    /// # Errors
    ///
    /// Returns `ObservationError::ReadOnlyProperty` if the key is read-only.
    pub fn set_property(&self, key: impl Into<String>, value: serde_json::Value) -> Result<(), ObservationError> {
        Ok(self.properties.set(key, value)?)
    }

    /// Sets a property value and declares it read-only.
    ///
    /// # Errors
    ///
    /// Returns `ObservationError::ReadOnlyProperty` if the key is already read-only.
    pub fn declare_read_only(&self, key: impl Into<String>, value: serde_json::Value) -> Result<(), ObservationError> {
        Ok(self.properties.declare_read_only(key, value)?)
    }

    /// Removes a property, returning its value if present.
    ///
    /// # Errors
    ///
    /// Returns `ObservationError::ReadOnlyProperty` if the key is read-only.
    pub fn remove_property(&self, key: &str) -> Result<Option<serde_json::Value>, ObservationError> {
        Ok(self.properties.remove(key)?)
    }

    /// Checks if a property exists.
    #[must_use]
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Returns true once the event stack has been created.
    #[must_use]
    pub fn has_event_stack(&self) -> bool {
        self.event_stack.lock().is_some()
    }

    /// Returns the number of open begin events.
    #[must_use]
    pub fn event_depth(&self) -> usize {
        self.event_stack.lock().as_ref().map_or(0, Vec::len)
    }

    /// Returns a copy of the open begin events, bottom to top.
    #[must_use]
    pub fn open_events(&self) -> Vec<BeginEvent> {
        self.event_stack.lock().clone().unwrap_or_default()
    }

    pub(crate) fn push_event(&self, event: BeginEvent) {
        self.event_stack.lock().get_or_insert_with(Vec::new).push(event);
    }

    pub(crate) fn pop_event(&self) -> Option<BeginEvent> {
        self.event_stack.lock().as_mut().and_then(Vec::pop)
    }

    /// Scans open events from the top of the stack down.
    pub(crate) fn any_open_event(&self, predicate: impl Fn(&BeginEvent) -> bool) -> bool {
        self.event_stack
            .lock()
            .as_ref()
            .is_some_and(|stack| stack.iter().rev().any(predicate))
    }
}
