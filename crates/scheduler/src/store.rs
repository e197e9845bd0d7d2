//! Shared queue state.
//!
//! One [`QueueState`] sits behind a single `Mutex` inside the scheduler:
//! the element map, the in-flight counter, and the last-dispatched
//! identity are always read and mutated together under that lock, and the
//! lock is never held across a benchmark run or a network call.

use std::collections::HashMap;

use paceline_core::ExecutionIdentifier;
use uuid::Uuid;

use crate::element::QueueElement;

/// Queue map, in-flight counter, and dispatch affinity marker.
///
/// Keys include the run token, so a retried element re-enters under a
/// logically new key. An element with `executing = true` is owned by
/// exactly one runner task.
#[derive(Debug, Default)]
pub(crate) struct QueueState {
    queue: HashMap<ExecutionIdentifier, QueueElement>,
    /// Executions currently running (all retries of an element count once).
    pub(crate) in_flight: usize,
    /// Identity most recently handed to a runner, for affinity selection.
    pub(crate) last_dispatched: Option<ExecutionIdentifier>,
}

impl QueueState {
    /// Insert an element, keyed by its identifier. Re-enqueueing the same
    /// identity replaces the previous entry — unless that entry is
    /// currently executing, in which case the insert is rejected: an
    /// executing element is owned by exactly one runner task, and
    /// displacing it would let a second runner claim the same identity.
    /// Returns whether the element was inserted.
    pub(crate) fn insert(&mut self, element: QueueElement) -> bool {
        if self
            .queue
            .get(&element.identifier)
            .is_some_and(|existing| existing.executing)
        {
            return false;
        }
        self.queue.insert(element.identifier.clone(), element);
        true
    }

    pub(crate) fn remove(&mut self, identifier: &ExecutionIdentifier) -> Option<QueueElement> {
        self.queue.remove(identifier)
    }

    pub(crate) fn depth(&self) -> usize {
        self.queue.len()
    }

    /// Pick the next element to run.
    ///
    /// Prefers a non-executing element configuration-equal to the last
    /// dispatched identity, keeping repeated runs of the same benchmark
    /// adjacent. Otherwise the first non-executing element in map order —
    /// tie-breaking among non-affine elements is unspecified.
    pub(crate) fn next_runnable(&self) -> Option<ExecutionIdentifier> {
        if let Some(last) = &self.last_dispatched {
            for element in self.queue.values() {
                if !element.executing && element.identifier.config_equals(last) {
                    return Some(element.identifier.clone());
                }
            }
        }

        self.queue
            .values()
            .find(|element| !element.executing)
            .map(|element| element.identifier.clone())
    }

    /// Mark an element as owned by a runner task, returning a working
    /// copy for that task.
    pub(crate) fn mark_executing(
        &mut self,
        identifier: &ExecutionIdentifier,
    ) -> Option<QueueElement> {
        let element = self.queue.get_mut(identifier)?;
        element.executing = true;
        Some(element.clone())
    }

    /// Re-key an element for a retry attempt: the stored entry moves to a
    /// fresh run token with a decremented budget, still executing. The
    /// configuration is unchanged.
    pub(crate) fn rekey_for_retry(
        &mut self,
        identifier: &ExecutionIdentifier,
        fresh_token: Uuid,
    ) {
        if let Some(mut element) = self.queue.remove(identifier) {
            element.identifier.run_id = fresh_token;
            element.retry_budget -= 1;
            self.queue.insert(element.identifier.clone(), element);
        }
    }
}
