//! Execution identity types.
//!
//! An [`ExecutionIdentifier`] names *what* is being benchmarked (git
//! reference, source, kind, planner version, pull-request context) plus a
//! unique run token minted per attempt. Full value equality — run token
//! included — keys the queue store; [`ExecutionIdentifier::config_equals`]
//! ignores the token and drives affinity batching and comparison
//! de-duplication. The two relations are deliberately separate operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of benchmark an execution runs.
///
/// `micro` is special-cased throughout (longer timeout, boolean
/// finished-query shape); every other kind is treated uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BenchmarkKind(String);

impl BenchmarkKind {
    pub const MICRO: &'static str = "micro";

    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// The micro-benchmark kind.
    pub fn micro() -> Self {
        Self(Self::MICRO.to_string())
    }

    pub fn is_micro(&self) -> bool {
        self.0 == Self::MICRO
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BenchmarkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one benchmark execution attempt.
///
/// Immutable once constructed, except for `run_id` which is replaced on
/// every retry — a retried execution is logically a new queue key with an
/// unchanged configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionIdentifier {
    /// Where the request came from (e.g. "cron_pr", "cron_main").
    pub source: String,
    /// Git reference being benchmarked.
    pub git_ref: String,
    /// Benchmark kind ("micro", "oltp", ...).
    pub benchmark_kind: BenchmarkKind,
    /// Query-planner version tag.
    pub planner_version: String,
    /// Pull-request number (0 when not a PR run).
    pub pull_nb: u64,
    /// Base reference of the pull request, when applicable.
    pub pull_base_ref: String,
    /// Product version string under test.
    pub version: String,
    /// Unique run token, fresh per attempt.
    pub run_id: Uuid,
}

impl ExecutionIdentifier {
    /// Configuration equality: every field except the run token.
    ///
    /// Two identities that are configuration-equal describe the same
    /// benchmark setup across different attempts or queue entries.
    pub fn config_equals(&self, other: &Self) -> bool {
        self.source == other.source
            && self.git_ref == other.git_ref
            && self.benchmark_kind == other.benchmark_kind
            && self.planner_version == other.planner_version
            && self.pull_nb == other.pull_nb
            && self.pull_base_ref == other.pull_base_ref
            && self.version == other.version
    }
}

impl fmt::Display for ExecutionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@{} [{}]",
            self.source, self.benchmark_kind, self.git_ref, self.run_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identifier() -> ExecutionIdentifier {
        ExecutionIdentifier {
            source: "cron_pr".to_string(),
            git_ref: "abc123".to_string(),
            benchmark_kind: BenchmarkKind::micro(),
            planner_version: "v3".to_string(),
            pull_nb: 42,
            pull_base_ref: "main".to_string(),
            version: "18.0".to_string(),
            run_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn config_equality_ignores_run_token() {
        let a = identifier();
        let mut b = a.clone();
        b.run_id = Uuid::new_v4();

        assert_ne!(a, b, "full equality must include the run token");
        assert!(a.config_equals(&b));
        assert!(b.config_equals(&a));
    }

    #[test]
    fn config_equality_covers_every_other_field() {
        let base = identifier();

        let mut changed = base.clone();
        changed.source = "cron_main".to_string();
        assert!(!base.config_equals(&changed));

        let mut changed = base.clone();
        changed.git_ref = "def456".to_string();
        assert!(!base.config_equals(&changed));

        let mut changed = base.clone();
        changed.benchmark_kind = BenchmarkKind::new("oltp");
        assert!(!base.config_equals(&changed));

        let mut changed = base.clone();
        changed.planner_version = "v2".to_string();
        assert!(!base.config_equals(&changed));

        let mut changed = base.clone();
        changed.pull_nb = 43;
        assert!(!base.config_equals(&changed));

        let mut changed = base.clone();
        changed.pull_base_ref = "release-18".to_string();
        assert!(!base.config_equals(&changed));

        let mut changed = base.clone();
        changed.version = "19.0".to_string();
        assert!(!base.config_equals(&changed));
    }

    #[test]
    fn distinct_tokens_are_distinct_map_keys() {
        use std::collections::HashMap;

        let a = identifier();
        let mut b = a.clone();
        b.run_id = Uuid::new_v4();

        let mut map = HashMap::new();
        map.insert(a.clone(), 1);
        map.insert(b.clone(), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&a], 1);
        assert_eq!(map[&b], 2);
    }

    #[test]
    fn micro_kind() {
        assert!(BenchmarkKind::micro().is_micro());
        assert!(!BenchmarkKind::new("oltp").is_micro());
        assert_eq!(BenchmarkKind::new("tpcc").to_string(), "tpcc");
    }
}
