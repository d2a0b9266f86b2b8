//! # Observation
//!
//! Tracks whether execution is currently nested inside a begin/end event pair.
//!
//! The crate provides:
//!
//! - **Event model**: begin, end and plain events with name filters
//! - **Execution contexts**: per-request state owning the open-event stack
//! - **Observation manager**: listener registry with synchronous dispatch
//! - **Observation context**: the listener maintaining the stack and
//!   answering `is_in` queries
//!
//! ## Quick Start
//!
//! ```rust
//! use observation::prelude::*;
//!
//! let manager = ObservationManager::new();
//! let tracker = manager.add_observation_context(ObservationConfig::default())?;
//!
//! let ctx = ExecutionContext::new();
//! manager.notify(Some(&ctx), &Event::begin("job.run"), None, None);
//! assert!(tracker.is_in(Some(&ctx), &BeginEvent::new("job.run")));
//!
//! manager.notify(Some(&ctx), &Event::end("job.run"), None, None);
//! assert!(!tracker.is_in(Some(&ctx), &BeginEvent::new("job.run")));
//! # Ok::<(), observation::errors::ObservationError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod context;
pub mod errors;
pub mod event;
pub mod listener;
pub mod manager;
pub mod observability;
pub mod testing;
pub mod tracker;
#[cfg(test)]
mod tracker_tests;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ObservationConfig, DEFAULT_LISTENER_NAME};
    pub use crate::context::{ContextGuard, Execution, ExecutionContext, PropertyBag};
    pub use crate::errors::{
        DuplicateListenerError, InvalidFilterError, ObservationError, ReadOnlyPropertyError,
    };
    pub use crate::event::{
        BeginEvent, EndEvent, Event, EventDescriptor, EventFilter, EventMatcher, EventRole,
    };
    pub use crate::listener::EventListener;
    pub use crate::manager::ObservationManager;
    pub use crate::observability::{init_logging, LoggingConfig};
    pub use crate::tracker::ObservationContext;
}
