//! Collaborator contracts.
//!
//! The scheduler core never launches benchmark binaries, queries a
//! datastore, or renders notifications itself; it drives these three
//! seams. Notification delivery lives in `paceline-notify`.

use std::time::Duration;

use async_trait::async_trait;
use paceline_core::ExecutionIdentifier;
use uuid::Uuid;

use crate::element::BenchmarkProfile;
use crate::error::ExecError;

/// A prepared benchmark run, ready to execute.
#[async_trait]
pub trait BenchmarkRun: Send {
    /// Run the benchmark to completion, bounded by `timeout`.
    ///
    /// The implementation enforces the wall-clock bound; exceeding it is
    /// a failure like any other.
    async fn execute(&mut self, timeout: Duration) -> Result<(), ExecError>;

    /// Finalize and persist the run's result.
    async fn commit(&mut self) -> Result<(), ExecError>;
}

/// Trait for benchmark execution backends.
#[async_trait]
pub trait BenchmarkExecutor: Send + Sync {
    /// Construct a run from the element's configuration and identity.
    ///
    /// Construction, preparation, and output-path failures are all
    /// reported here and consume one retry each.
    async fn prepare(
        &self,
        profile: &BenchmarkProfile,
        identifier: &ExecutionIdentifier,
    ) -> Result<Box<dyn BenchmarkRun>, ExecError>;
}

/// Queries over persisted benchmark results.
///
/// All three queries match on the configuration-equal identity: the run
/// token of the argument is ignored.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Whether a finished execution with this configuration exists.
    /// Used for the "micro" kind, where existence is boolean.
    async fn exists_finished(
        &self,
        identifier: &ExecutionIdentifier,
    ) -> Result<bool, ExecError>;

    /// Number of finished executions with this configuration.
    /// Used for every kind other than "micro".
    async fn count_finished(
        &self,
        identifier: &ExecutionIdentifier,
    ) -> Result<usize, ExecError>;

    /// Run token of a finished execution matching this configuration,
    /// or `None` when no such execution has finished yet.
    async fn find_finished(
        &self,
        identifier: &ExecutionIdentifier,
    ) -> Result<Option<Uuid>, ExecError>;
}
