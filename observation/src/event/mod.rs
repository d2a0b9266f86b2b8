//! Event model for the observation system.
//!
//! Events come in three roles:
//! - **begin** events open a nestable operation,
//! - **end** events close the most recently opened one,
//! - **plain** events carry no nesting meaning.
//!
//! Every role wraps an [`EventDescriptor`] (an event type plus an
//! [`EventFilter`]) which drives matching.

mod filter;
mod types;

pub use filter::{EventFilter, RegexFilter, ALWAYS_MATCHING_FILTER};
pub use types::{BeginEvent, EndEvent, Event, EventDescriptor, EventMatcher, EventRole};
