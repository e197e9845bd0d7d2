//! Queued execution elements.

use std::path::{Path, PathBuf};

use paceline_core::ExecutionIdentifier;
use serde::{Deserialize, Serialize};

/// Opaque handle to a benchmark configuration file or blob.
///
/// The scheduler never reads it; it is passed through to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkProfile(PathBuf);

impl BenchmarkProfile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// One unit of pending benchmark work, owned by the queue store from
/// insertion until exhaustion or successful completion.
#[derive(Debug, Clone)]
pub struct QueueElement {
    /// Identity of the execution; its run token changes per retry.
    pub identifier: ExecutionIdentifier,
    /// Configuration handed to the executor.
    pub profile: BenchmarkProfile,
    /// Set while a runner task owns this element.
    pub executing: bool,
    /// Remaining retries. The element is dropped once this goes negative,
    /// so a budget of N allows N+1 attempts.
    pub retry_budget: i32,
    /// Sibling executions to compare against after success.
    pub compare_with: Vec<ExecutionIdentifier>,
    /// Notify even when no regression is detected downstream.
    pub notify_always: bool,
}

impl QueueElement {
    pub fn new(
        identifier: ExecutionIdentifier,
        profile: BenchmarkProfile,
        retry_budget: i32,
        compare_with: Vec<ExecutionIdentifier>,
        notify_always: bool,
    ) -> Self {
        Self {
            identifier,
            profile,
            executing: false,
            retry_budget,
            compare_with,
            notify_always,
        }
    }
}
