//! Regression alert payload.

use paceline_core::BenchmarkKind;
use serde::Serialize;

/// Everything a channel needs to render a regression notification:
/// both sides of the comparison plus the shared execution context.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionAlert {
    /// Source of the finished execution.
    pub source: String,
    /// Source of the sibling it was compared against.
    pub compared_source: String,
    /// Git reference of the finished execution.
    pub git_ref: String,
    /// Git reference of the compared sibling.
    pub compared_git_ref: String,
    /// Planner version of the finished execution.
    pub planner_version: String,
    /// Benchmark kind of the finished execution.
    pub benchmark_kind: BenchmarkKind,
    /// Pull-request number of the finished execution (0 when none).
    pub pull_nb: u64,
    /// Notify even when no regression is detected downstream.
    pub always_notify: bool,
}
