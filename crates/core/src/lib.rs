pub mod config;
pub mod error;
pub mod identifier;

pub use config::{load_dotenv, SchedulerConfig};
pub use error::ConfigError;
pub use identifier::{BenchmarkKind, ExecutionIdentifier};
