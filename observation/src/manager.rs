//! Listener registry and synchronous event dispatch.

use crate::config::ObservationConfig;
use crate::context::{Execution, ExecutionContext};
use crate::errors::{DuplicateListenerError, ObservationError};
use crate::event::Event;
use crate::listener::EventListener;
use crate::tracker::ObservationContext;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Registers listeners and dispatches events to them.
///
/// Dispatch is synchronous and follows registration order. The registry lock
/// is released before listeners run, so a listener may add or remove
/// listeners from inside `on_event`; the change applies to later events.
#[derive(Default)]
pub struct ObservationManager {
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

impl fmt::Debug for ObservationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationManager")
            .field("listeners", &self.listener_names())
            .finish()
    }
}

impl ObservationManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    ///
    /// # Errors
    ///
    /// Returns `ObservationError::DuplicateListener` if a listener with the
    /// same name is already registered.
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) -> Result<(), ObservationError> {
        let mut listeners = self.listeners.write();

        if listeners.iter().any(|l| l.name() == listener.name()) {
            return Err(DuplicateListenerError::new(listener.name()).into());
        }

        debug!(
            listener = %listener.name(),
            events = ?listener.events().iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Listener registered"
        );
        listeners.push(listener);
        Ok(())
    }

    /// Creates an observation context tracker and registers it.
    ///
    /// # Errors
    ///
    /// Returns `ObservationError::DuplicateListener` if the tracker name is taken.
    pub fn add_observation_context(
        &self,
        config: ObservationConfig,
    ) -> Result<Arc<ObservationContext>, ObservationError> {
        let tracker = Arc::new(ObservationContext::with_config(config));
        self.add_listener(tracker.clone())?;
        Ok(tracker)
    }

    /// Unregisters a listener by name, returning it if it was registered.
    pub fn remove_listener(&self, name: &str) -> Option<Arc<dyn EventListener>> {
        let mut listeners = self.listeners.write();
        let pos = listeners.iter().position(|l| l.name() == name)?;

        debug!(listener = %name, "Listener removed");
        Some(listeners.remove(pos))
    }

    /// Returns the listener registered under `name`.
    #[must_use]
    pub fn listener(&self, name: &str) -> Option<Arc<dyn EventListener>> {
        self.listeners.read().iter().find(|l| l.name() == name).cloned()
    }

    /// Returns the registered listener names, in registration order.
    #[must_use]
    pub fn listener_names(&self) -> Vec<String> {
        self.listeners.read().iter().map(|l| l.name().to_string()).collect()
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// Returns true if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Dispatches an event to every listener accepting it.
    ///
    /// Returns the number of listeners notified.
    pub fn notify(
        &self,
        ctx: Option<&ExecutionContext>,
        event: &Event,
        source: Option<&serde_json::Value>,
        data: Option<&serde_json::Value>,
    ) -> usize {
        let targets: Vec<Arc<dyn EventListener>> = self
            .listeners
            .read()
            .iter()
            .filter(|l| l.accepts(event))
            .cloned()
            .collect();

        trace!(event = %event, listeners = targets.len(), "Dispatching event");

        for listener in &targets {
            listener.on_event(ctx, event, source, data);
        }

        targets.len()
    }

    /// Dispatches an event using the current context of `execution`.
    pub fn notify_current(
        &self,
        execution: &Execution,
        event: &Event,
        source: Option<&serde_json::Value>,
        data: Option<&serde_json::Value>,
    ) -> usize {
        let ctx = execution.context();
        self.notify(ctx.as_deref(), event, source, data)
    }
}
