//! The scheduler object and its dispatch loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use paceline_core::{ExecutionIdentifier, SchedulerConfig};
use paceline_notify::RegressionNotifier;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::element::{BenchmarkProfile, QueueElement};
use crate::error::ExecError;
use crate::metrics::SchedulerMetrics;
use crate::store::QueueState;
use crate::traits::{BenchmarkExecutor, ResultStore};

/// Single-process, in-memory benchmark scheduler.
///
/// Owns the queue map, the in-flight counter, and the last-dispatched
/// identity as private state behind one mutex; every read or mutation of
/// any of the three happens under that lock, which is held only for a
/// dispatch decision or a single insert/remove — never across a run or a
/// network call.
pub struct Scheduler {
    config: SchedulerConfig,
    state: Mutex<QueueState>,
    /// Signaled on enqueue, on freed capacity, and on shutdown.
    wake: Notify,
    shutdown: Arc<AtomicBool>,
    pub(crate) executor: Arc<dyn BenchmarkExecutor>,
    pub(crate) results: Arc<dyn ResultStore>,
    pub(crate) notifier: Arc<dyn RegressionNotifier>,
    pub(crate) metrics: Arc<RwLock<SchedulerMetrics>>,
}

impl Scheduler {
    /// Create a scheduler wired to its three collaborators.
    pub fn new(
        config: SchedulerConfig,
        executor: Arc<dyn BenchmarkExecutor>,
        results: Arc<dyn ResultStore>,
        notifier: Arc<dyn RegressionNotifier>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            state: Mutex::new(QueueState::default()),
            wake: Notify::new(),
            shutdown: Arc::new(AtomicBool::new(false)),
            executor,
            results,
            notifier,
            metrics: Arc::new(RwLock::new(SchedulerMetrics::default())),
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().expect("scheduler state lock poisoned")
    }

    /// Wake the dispatch loop; called whenever the queue or the in-flight
    /// counter may have changed.
    pub(crate) fn wake_dispatcher(&self) {
        self.wake.notify_one();
    }

    /// Insert an element into the queue and wake the dispatcher.
    ///
    /// The only synchronous entry point; it cannot fail. Enqueueing an
    /// identity already present replaces the previous entry, except when
    /// that entry is currently executing: a runner task owns it, so the
    /// insert is dropped with a warning instead of creating a second
    /// owner.
    pub fn enqueue(&self, element: QueueElement) {
        let identifier = element.identifier.clone();
        let (inserted, depth) = {
            let mut state = self.state();
            let inserted = state.insert(element);
            (inserted, state.depth())
        };
        if inserted {
            debug!(queue_depth = depth, "element enqueued");
        } else {
            warn!(
                identifier = %identifier,
                "enqueue ignored: identity is currently executing"
            );
        }
        self.wake_dispatcher();
    }

    /// Build and enqueue an element carrying the configured default
    /// retry budget; for producers with no per-element retry policy.
    pub fn enqueue_with_defaults(
        &self,
        identifier: ExecutionIdentifier,
        profile: BenchmarkProfile,
        compare_with: Vec<ExecutionIdentifier>,
        notify_always: bool,
    ) {
        self.enqueue(QueueElement::new(
            identifier,
            profile,
            self.config.default_retry_budget,
            compare_with,
            notify_always,
        ));
    }

    /// Number of elements currently in the queue, executing included.
    pub fn queue_depth(&self) -> usize {
        self.state().depth()
    }

    /// Number of executions currently in flight.
    pub fn in_flight(&self) -> usize {
        self.state().in_flight
    }

    /// Signal the dispatch loop to stop. In-flight executions and
    /// comparison sessions are unaffected.
    pub fn shutdown(&self) {
        info!("scheduler shutdown requested");
        self.shutdown.store(true, Ordering::Relaxed);
        self.wake.notify_waiters();
        self.wake.notify_one();
    }

    /// Get an Arc to the shutdown flag (for external shutdown signaling).
    pub fn shutdown_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Get a snapshot of the current scheduler metrics.
    pub fn metrics(&self) -> SchedulerMetrics {
        self.metrics.read().expect("metrics lock poisoned").clone()
    }

    /// Get an Arc to the metrics (for external reads without cloning).
    pub fn metrics_handle(&self) -> Arc<RwLock<SchedulerMetrics>> {
        Arc::clone(&self.metrics)
    }

    /// Run the dispatch loop until [`Scheduler::shutdown`] is called.
    ///
    /// Each cycle dispatches at most one element; after a successful
    /// dispatch the loop re-runs immediately to fill remaining capacity.
    /// When nothing is runnable it parks on the wake signal, with a short
    /// idle backoff as a fallback, instead of spinning.
    pub async fn run(self: Arc<Self>) {
        info!(
            max_concurrent_jobs = self.config.max_concurrent_jobs,
            "scheduler starting"
        );

        while !self.shutdown.load(Ordering::Relaxed) {
            if self.dispatch_one() {
                continue;
            }
            tokio::select! {
                _ = self.wake.notified() => {}
                _ = tokio::time::sleep(self.config.idle_backoff()) => {}
            }
        }

        info!("scheduler stopped");
    }

    /// One dispatch cycle, performed under the state lock.
    ///
    /// Selection prefers a non-executing element configuration-equal to
    /// the last dispatched identity, falling back to the first
    /// non-executing element in map order. Returns whether an element was
    /// handed to a runner task.
    fn dispatch_one(self: &Arc<Self>) -> bool {
        let element = {
            let mut state = self.state();
            if state.in_flight >= self.config.max_concurrent_jobs {
                return false;
            }
            let Some(key) = state.next_runnable() else {
                return false;
            };
            state.in_flight += 1;
            state.last_dispatched = Some(key.clone());
            match state.mark_executing(&key) {
                Some(element) => element,
                None => {
                    state.in_flight -= 1;
                    return false;
                }
            }
        };

        if let Ok(mut m) = self.metrics.write() {
            m.record_dispatch();
        }
        debug!(identifier = %element.identifier, "dispatching element");

        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            scheduler.run_element(element).await;
        });

        true
    }

    /// Number of finished executions matching this configuration, in the
    /// two query shapes the admission layer needs: boolean existence for
    /// "micro", a count for every other kind.
    pub async fn finished_count(
        &self,
        identifier: &ExecutionIdentifier,
    ) -> Result<usize, ExecError> {
        if identifier.benchmark_kind.is_micro() {
            let exists = self.results.exists_finished(identifier).await?;
            Ok(usize::from(exists))
        } else {
            self.results.count_finished(identifier).await
        }
    }
}
