//! Notifier trait definition.

use async_trait::async_trait;

use crate::alert::RegressionAlert;
use crate::error::NotifyError;

/// Trait for regression notification channels.
///
/// Implementations own rendering and transport; the scheduler only hands
/// over the [`RegressionAlert`] payload. A returned error aborts the
/// comparison session that triggered the notification.
#[async_trait]
pub trait RegressionNotifier: Send + Sync {
    /// Deliver a regression alert through this channel.
    async fn notify(&self, alert: &RegressionAlert) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "webhook").
    fn channel_name(&self) -> &str;
}
