//! Reference-counted loading indicator tracking.
//!
//! The view layer shows one spinner for any number of in-flight operations.
//! Tasks register by name so overlapping operations (the initial catalog load
//! and a later order submission, say) don't prematurely hide each other's
//! indicator: the spinner stays visible until the last registered task
//! finishes.

use std::collections::HashSet;

/// Tracks named in-flight tasks for the loading indicator.
#[derive(Debug, Default)]
pub struct LoadingTracker {
    tasks: HashSet<String>,
}

impl LoadingTracker {
    /// Create an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named task as in flight.
    pub fn begin(&mut self, task: &str) {
        self.tasks.insert(task.to_owned());
    }

    /// Mark a named task as finished. Unknown names are ignored.
    pub fn finish(&mut self, task: &str) {
        self.tasks.remove(task);
    }

    /// Drop every task, forcing the indicator hidden.
    pub fn finish_all(&mut self) {
        self.tasks.clear();
    }

    /// Whether any task is still in flight (indicator should be visible).
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.tasks.is_empty()
    }
}
