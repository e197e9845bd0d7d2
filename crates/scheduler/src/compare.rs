//! Post-completion comparison sessions.
//!
//! After an element finishes successfully, a session polls the result
//! store for each configured sibling and notifies as each one turns up.
//! The session is best-effort and fail-fast: any store or delivery error
//! abandons the remaining siblings (already-sent notifications stand),
//! and there is no overall deadline — a sibling may legitimately sit
//! queued behind other work for a long time.

use std::collections::HashSet;
use std::sync::Arc;

use paceline_core::ExecutionIdentifier;
use paceline_notify::RegressionAlert;
use tracing::{debug, error};

use crate::element::QueueElement;
use crate::scheduler::Scheduler;

impl Scheduler {
    /// Poll until every comparison sibling of `element` has resolved,
    /// notifying on first discovery of each. Holds no queue lock and
    /// never touches scheduling capacity.
    pub(crate) async fn compare_element(self: Arc<Self>, element: QueueElement) {
        let mut seen: HashSet<ExecutionIdentifier> = HashSet::new();
        let mut done = 0usize;

        while done != element.compare_with.len() {
            tokio::time::sleep(self.config().comparison_poll_interval()).await;

            for sibling in &element.compare_with {
                if seen.contains(sibling) {
                    continue;
                }

                let found = match self.results.find_finished(sibling).await {
                    Ok(found) => found,
                    Err(e) => {
                        error!(
                            identifier = %element.identifier,
                            sibling = %sibling,
                            error = %e,
                            "comparison lookup failed, abandoning session"
                        );
                        if let Ok(mut m) = self.metrics.write() {
                            m.record_session_abort();
                        }
                        return;
                    }
                };

                let Some(sibling_run) = found else {
                    // Not finished yet; try again next round.
                    continue;
                };

                let alert = RegressionAlert {
                    source: element.identifier.source.clone(),
                    compared_source: sibling.source.clone(),
                    git_ref: element.identifier.git_ref.clone(),
                    compared_git_ref: sibling.git_ref.clone(),
                    planner_version: element.identifier.planner_version.clone(),
                    benchmark_kind: element.identifier.benchmark_kind.clone(),
                    pull_nb: element.identifier.pull_nb,
                    always_notify: element.notify_always,
                };

                if let Err(e) = self.notifier.notify(&alert).await {
                    error!(
                        identifier = %element.identifier,
                        sibling = %sibling,
                        channel = self.notifier.channel_name(),
                        error = %e,
                        "regression notification failed, abandoning session"
                    );
                    if let Ok(mut m) = self.metrics.write() {
                        m.record_session_abort();
                    }
                    return;
                }

                debug!(
                    identifier = %element.identifier,
                    sibling = %sibling,
                    sibling_run = %sibling_run,
                    "comparison resolved and notified"
                );
                if let Ok(mut m) = self.metrics.write() {
                    m.record_notification();
                }
                seen.insert(sibling.clone());
                done += 1;
            }
        }

        debug!(
            identifier = %element.identifier,
            resolved = done,
            "comparison session complete"
        );
    }
}
