//! Current-context handle for a thread or request.

use super::ExecutionContext;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;

/// Holds the stack of execution contexts active on one thread or request.
///
/// The top of the stack is the current context. Nested work (a sub-request,
/// a background job started inline) pushes its own context and pops it when
/// done, leaving the outer context untouched.
#[derive(Debug, Default)]
pub struct Execution {
    contexts: Mutex<Vec<Arc<ExecutionContext>>>,
}

impl Execution {
    /// Creates an execution with no current context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an execution whose current context is `context`.
    #[must_use]
    pub fn with_context(context: Arc<ExecutionContext>) -> Self {
        Self {
            contexts: Mutex::new(vec![context]),
        }
    }

    /// Returns the current context, if any.
    #[must_use]
    pub fn context(&self) -> Option<Arc<ExecutionContext>> {
        self.contexts.lock().last().cloned()
    }

    /// Makes `context` the current context, keeping the previous one below it.
    pub fn push_context(&self, context: Arc<ExecutionContext>) {
        self.contexts.lock().push(context);
    }

    /// Removes and returns the current context.
    pub fn pop_context(&self) -> Option<Arc<ExecutionContext>> {
        self.contexts.lock().pop()
    }

    /// Replaces the current context, or pushes it when there is none.
    pub fn set_context(&self, context: Arc<ExecutionContext>) {
        let mut contexts = self.contexts.lock();
        if let Some(top) = contexts.last_mut() {
            *top = context;
        } else {
            contexts.push(context);
        }
    }

    /// Drops every context.
    pub fn remove_context(&self) {
        self.contexts.lock().clear();
    }

    /// Returns the number of stacked contexts.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.contexts.lock().len()
    }

    /// Pushes `context` and returns a guard that pops it when dropped.
    #[must_use = "the context is popped as soon as the guard is dropped"]
    pub fn enter(&self, context: Arc<ExecutionContext>) -> ContextGuard<'_> {
        self.push_context(context.clone());
        ContextGuard {
            execution: self,
            context,
        }
    }
}

/// Scope guard returned by [`Execution::enter`].
#[derive(Debug)]
pub struct ContextGuard<'a> {
    execution: &'a Execution,
    context: Arc<ExecutionContext>,
}

impl ContextGuard<'_> {
    /// Returns the context this guard entered.
    #[must_use]
    pub fn context(&self) -> &Arc<ExecutionContext> {
        &self.context
    }
}

impl Drop for ContextGuard<'_> {
    fn drop(&mut self) {
        let mut contexts = self.execution.contexts.lock();

        if contexts.last().is_some_and(|top| Arc::ptr_eq(top, &self.context)) {
            contexts.pop();
        } else if let Some(pos) = contexts.iter().rposition(|c| Arc::ptr_eq(c, &self.context)) {
            warn!(
                context_id = %self.context.id(),
                "Execution context guard dropped out of order"
            );
            contexts.remove(pos);
        }
    }
}
