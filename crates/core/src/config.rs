//! Scheduler configuration.
//!
//! Values come from a TOML file, from environment variables (optionally
//! via a `.env` file), or from the serde defaults. The concurrency cap
//! and retry budget are supplied here, never computed by the scheduler.

use std::env;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn env_usize(key: &str, default: usize) -> usize {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_i32(key: &str, default: i32) -> i32 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Scheduler configuration, typically parsed from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Maximum number of concurrently running benchmark executions.
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,
    /// Retry budget assigned to newly enqueued elements. Signed: an
    /// element is dropped once its budget goes negative.
    #[serde(default = "default_retry_budget")]
    pub default_retry_budget: i32,
    /// Sleep between comparison polling rounds, in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub comparison_poll_interval_ms: u64,
    /// Dispatcher sleep when the queue has nothing runnable and no wake
    /// signal arrives, in milliseconds.
    #[serde(default = "default_idle_backoff")]
    pub idle_backoff_ms: u64,
}

fn default_max_concurrent_jobs() -> usize { 1 }
fn default_retry_budget() -> i32 { 1 }
fn default_poll_interval() -> u64 { 1000 }
fn default_idle_backoff() -> u64 { 50 }

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: default_max_concurrent_jobs(),
            default_retry_budget: default_retry_budget(),
            comparison_poll_interval_ms: default_poll_interval(),
            idle_backoff_ms: default_idle_backoff(),
        }
    }
}

impl SchedulerConfig {
    /// Build config from environment variables (call [`load_dotenv`] first).
    pub fn from_env() -> Self {
        Self {
            max_concurrent_jobs: env_usize(
                "PACELINE_MAX_CONCURRENT_JOBS",
                default_max_concurrent_jobs(),
            ),
            default_retry_budget: env_i32(
                "PACELINE_RETRY_BUDGET",
                default_retry_budget(),
            ),
            comparison_poll_interval_ms: env_u64(
                "PACELINE_COMPARISON_POLL_INTERVAL_MS",
                default_poll_interval(),
            ),
            idle_backoff_ms: env_u64(
                "PACELINE_IDLE_BACKOFF_MS",
                default_idle_backoff(),
            ),
        }
    }

    /// Parse config from a TOML file. Missing keys fall back to defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn comparison_poll_interval(&self) -> Duration {
        Duration::from_millis(self.comparison_poll_interval_ms)
    }

    pub fn idle_backoff(&self) -> Duration {
        Duration::from_millis(self.idle_backoff_ms)
    }
}
