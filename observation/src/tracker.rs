//! Tracker answering "are we currently inside this operation?".
//!
//! [`ObservationContext`] listens to every event. Begin events are pushed on
//! the event stack of the dispatching execution context, end events pop it.
//! [`ObservationContext::is_in`] then tells whether an open begin event
//! matches a given pattern.

use crate::config::ObservationConfig;
pub use crate::config::DEFAULT_LISTENER_NAME;
use crate::context::{Execution, ExecutionContext};
use crate::event::{BeginEvent, EndEvent, Event, EventMatcher};
use crate::listener::EventListener;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, trace};

/// Tracks open begin events per execution context.
#[derive(Debug)]
pub struct ObservationContext {
    config: ObservationConfig,
    events: Vec<EventMatcher>,
    /// End events seen with no open begin event.
    unbalanced: AtomicU64,
}

impl Default for ObservationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationContext {
    /// Creates a tracker with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ObservationConfig::default())
    }

    /// Creates a tracker with the given configuration.
    ///
    /// A blank listener name falls back to [`DEFAULT_LISTENER_NAME`].
    #[must_use]
    pub fn with_config(mut config: ObservationConfig) -> Self {
        if config.listener_name.trim().is_empty() {
            config.listener_name = DEFAULT_LISTENER_NAME.to_string();
        }

        Self {
            config,
            events: vec![EventMatcher::All],
            unbalanced: AtomicU64::new(0),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ObservationConfig {
        &self.config
    }

    /// Returns true if an open begin event of `ctx` is matched by `pattern`.
    ///
    /// Returns false when there is no context or nothing is open.
    #[must_use]
    pub fn is_in(&self, ctx: Option<&ExecutionContext>, pattern: &BeginEvent) -> bool {
        ctx.is_some_and(|ctx| ctx.any_open_event(|open| pattern.matches(open)))
    }

    /// Same as [`is_in`](Self::is_in) using the current context of `execution`.
    #[must_use]
    pub fn is_in_current(&self, execution: &Execution, pattern: &BeginEvent) -> bool {
        execution
            .context()
            .is_some_and(|ctx| self.is_in(Some(&*ctx), pattern))
    }

    /// Returns the number of end events received with no open begin event.
    #[must_use]
    pub fn unbalanced_end_events(&self) -> u64 {
        self.unbalanced.load(Ordering::Relaxed)
    }

    fn begin(&self, ctx: Option<&ExecutionContext>, event: &BeginEvent) {
        // Nowhere to record it without a context.
        let Some(ctx) = ctx else {
            return;
        };

        ctx.push_event(event.clone());
        trace!(
            context_id = %ctx.id(),
            event = %event,
            depth = ctx.event_depth(),
            "Begin event pushed"
        );
    }

    fn end(&self, ctx: Option<&ExecutionContext>, event: &EndEvent) {
        if let Some(closed) = ctx.and_then(ExecutionContext::pop_event) {
            trace!(event = %event, closed = %closed, "Begin event popped");
            return;
        }

        self.unbalanced.fetch_add(1, Ordering::Relaxed);

        if self.config.log_unbalanced_end_events {
            error!(
                listener = %self.config.listener_name,
                event = %event,
                context_id = ?ctx.map(ExecutionContext::id),
                "Can't find any begin event corresponding to [{}]", event
            );
        }
    }
}

impl EventListener for ObservationContext {
    fn name(&self) -> &str {
        &self.config.listener_name
    }

    fn events(&self) -> &[EventMatcher] {
        &self.events
    }

    fn on_event(
        &self,
        ctx: Option<&ExecutionContext>,
        event: &Event,
        _source: Option<&serde_json::Value>,
        _data: Option<&serde_json::Value>,
    ) {
        match event {
            Event::Begin(begin) => self.begin(ctx, begin),
            Event::End(end) => self.end(ctx, end),
            Event::Plain(_) => {}
        }
    }
}
