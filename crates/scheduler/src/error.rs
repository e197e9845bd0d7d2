//! Execution error types.
//!
//! Every variant is equivalent to the retry policy: a failed preparation
//! and a timed-out run both consume one retry, with no distinction made
//! between "ran and failed" and "never started".

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("preparation failed: {0}")]
    Prepare(String),

    #[error("execution failed: {0}")]
    Execute(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("result commit failed: {0}")]
    Commit(String),

    #[error("result store error: {0}")]
    Store(String),
}
