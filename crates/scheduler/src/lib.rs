//! Bounded-concurrency scheduler for continuous benchmarking.
//!
//! External producers enqueue [`QueueElement`]s; the dispatch loop admits
//! at most `max_concurrent_jobs` of them at a time, preferring elements
//! whose configuration matches the previously dispatched one. Failed
//! executions retry with a fresh run token until their budget is spent;
//! successful ones hand off to a background comparison session that polls
//! for sibling results and emits regression notifications.

mod compare;
pub mod element;
pub mod error;
pub mod metrics;
mod runner;
pub mod scheduler;
mod store;
pub mod traits;

pub use element::{BenchmarkProfile, QueueElement};
pub use error::ExecError;
pub use metrics::SchedulerMetrics;
pub use scheduler::Scheduler;
pub use traits::{BenchmarkExecutor, BenchmarkRun, ResultStore};
