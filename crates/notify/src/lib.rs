//! Regression notification delivery.
//!
//! Defines the alert payload emitted when a finished benchmark gets
//! compared against a sibling run, the [`RegressionNotifier`] trait the
//! scheduler delivers through, and a webhook implementation.

pub mod alert;
pub mod error;
pub mod notifier;
pub mod webhook;

pub use alert::RegressionAlert;
pub use error::NotifyError;
pub use notifier::RegressionNotifier;
pub use webhook::WebhookNotifier;
