//! Execution runner with retry.
//!
//! A dispatched element is attempted until it succeeds or its retry
//! budget goes negative. Every failed attempt — construction,
//! preparation, execution, timeout, or commit — is handled identically:
//! log, decrement the budget, mint a fresh run token, try again. The
//! retry chain is a loop, not recursion, so a deep retry budget cannot
//! grow the call stack.

use std::sync::Arc;
use std::time::Duration;

use paceline_core::{BenchmarkKind, ExecutionIdentifier};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::element::{BenchmarkProfile, QueueElement};
use crate::error::ExecError;
use crate::scheduler::Scheduler;

/// Wall-clock bound for one micro-benchmark attempt.
const MICRO_EXECUTION_TIMEOUT: Duration = Duration::from_secs(4 * 60 * 60);
/// Wall-clock bound for one attempt of any other kind.
const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_secs(60 * 60);

pub(crate) fn execution_timeout(kind: &BenchmarkKind) -> Duration {
    if kind.is_micro() {
        MICRO_EXECUTION_TIMEOUT
    } else {
        DEFAULT_EXECUTION_TIMEOUT
    }
}

impl Scheduler {
    /// Run one dispatched element to termination: success, or budget
    /// exhaustion. Owns the element's in-flight slot for the whole chain
    /// of attempts and frees it exactly once on the way out.
    pub(crate) async fn run_element(self: Arc<Self>, mut element: QueueElement) {
        loop {
            if element.retry_budget < 0 {
                // Exhausted (or enqueued already exhausted): drop the
                // element without a result and without a comparison. The
                // last error was logged by the failing attempt.
                warn!(
                    identifier = %element.identifier,
                    "retry budget exhausted, dropping element"
                );
                {
                    let mut state = self.state();
                    state.remove(&element.identifier);
                    state.in_flight -= 1;
                }
                if let Ok(mut m) = self.metrics.write() {
                    m.record_exhaustion();
                }
                self.wake_dispatcher();
                return;
            }

            match self
                .execute_single(&element.profile, &element.identifier)
                .await
            {
                Ok(()) => {
                    {
                        let mut state = self.state();
                        state.remove(&element.identifier);
                        state.in_flight -= 1;
                    }
                    if let Ok(mut m) = self.metrics.write() {
                        m.record_success(&element.identifier.benchmark_kind);
                    }
                    self.wake_dispatcher();

                    // Comparison runs unsupervised; nothing awaits or
                    // cancels it, and it never touches scheduling
                    // capacity.
                    let scheduler = Arc::clone(&self);
                    tokio::spawn(async move {
                        scheduler.compare_element(element).await;
                    });
                    return;
                }
                Err(e) => {
                    error!(
                        identifier = %element.identifier,
                        error = %e,
                        remaining_retries = element.retry_budget,
                        "execution attempt failed"
                    );
                    if let Ok(mut m) = self.metrics.write() {
                        m.record_failed_attempt();
                    }

                    // The next attempt is a logically new identity with
                    // an unchanged configuration.
                    let fresh_token = Uuid::new_v4();
                    {
                        let mut state = self.state();
                        state.rekey_for_retry(&element.identifier, fresh_token);
                    }
                    element.identifier.run_id = fresh_token;
                    element.retry_budget -= 1;
                }
            }
        }
    }

    /// One attempt: prepare, execute within the kind's timeout, commit.
    async fn execute_single(
        &self,
        profile: &BenchmarkProfile,
        identifier: &ExecutionIdentifier,
    ) -> Result<(), ExecError> {
        info!(
            run_id = %identifier.run_id,
            git_ref = %identifier.git_ref,
            kind = %identifier.benchmark_kind,
            "starting benchmark execution"
        );

        let mut run = self
            .executor
            .prepare(profile, identifier)
            .await
            .map_err(|e| {
                error!(run_id = %identifier.run_id, error = %e, "prepare failed");
                e
            })?;

        let timeout = execution_timeout(&identifier.benchmark_kind);
        run.execute(timeout).await.map_err(|e| {
            error!(run_id = %identifier.run_id, error = %e, "execute failed");
            e
        })?;

        run.commit().await.map_err(|e| {
            error!(run_id = %identifier.run_id, error = %e, "commit failed");
            e
        })?;

        info!(
            run_id = %identifier.run_id,
            git_ref = %identifier.git_ref,
            kind = %identifier.benchmark_kind,
            "finished benchmark execution"
        );
        Ok(())
    }
}
