//! Scheduler operational metrics.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use paceline_core::BenchmarkKind;
use serde::Serialize;

/// Counters exposed by the scheduler for dashboards and alerting.
///
/// Notably, `elements_exhausted` is the only externally visible trace of
/// an execution that spent its whole retry budget: the scheduler drops
/// such elements without surfacing an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchedulerMetrics {
    /// Dispatches handed to a runner task.
    pub executions_started: u64,
    /// Elements that completed successfully.
    pub executions_succeeded: u64,
    /// Failed attempts (each consumes one retry).
    pub attempts_failed: u64,
    /// Elements dropped after their retry budget went negative.
    pub elements_exhausted: u64,
    /// Regression notifications delivered.
    pub notifications_sent: u64,
    /// Comparison sessions abandoned after a store or delivery error.
    pub comparison_sessions_aborted: u64,
    /// Successful executions per benchmark kind.
    pub succeeded_by_kind: HashMap<String, u64>,
    /// Last successful completion time.
    pub last_success_at: Option<DateTime<Utc>>,
    /// Last failed attempt time.
    pub last_failure_at: Option<DateTime<Utc>>,
}

impl SchedulerMetrics {
    pub fn record_dispatch(&mut self) {
        self.executions_started += 1;
    }

    pub fn record_success(&mut self, kind: &BenchmarkKind) {
        self.executions_succeeded += 1;
        *self
            .succeeded_by_kind
            .entry(kind.as_str().to_string())
            .or_default() += 1;
        self.last_success_at = Some(Utc::now());
    }

    pub fn record_failed_attempt(&mut self) {
        self.attempts_failed += 1;
        self.last_failure_at = Some(Utc::now());
    }

    pub fn record_exhaustion(&mut self) {
        self.elements_exhausted += 1;
    }

    pub fn record_notification(&mut self) {
        self.notifications_sent += 1;
    }

    pub fn record_session_abort(&mut self) {
        self.comparison_sessions_aborted += 1;
    }
}
