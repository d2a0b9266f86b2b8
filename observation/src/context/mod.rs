//! Execution context management.
//!
//! This module provides:
//! - A thread-safe property bag for request-scoped values
//! - The per-request execution context owning the open-event stack
//! - The `Execution` handle tracking the current context

mod bags;
mod execution;
mod scope;

pub use bags::PropertyBag;
pub use execution::ExecutionContext;
pub use scope::{ContextGuard, Execution};
