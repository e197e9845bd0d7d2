//! Notification error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("configuration error: {0}")]
    Config(String),
}
