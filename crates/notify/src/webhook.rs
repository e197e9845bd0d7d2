//! HTTP webhook notifier.
//!
//! Delivers regression alerts as JSON payloads to a configured webhook
//! URL with optional static headers.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::alert::RegressionAlert;
use crate::error::NotifyError;
use crate::notifier::RegressionNotifier;

/// Delivers regression alerts as JSON over HTTP POST.
#[derive(Debug)]
pub struct WebhookNotifier {
    /// Target URL.
    url: String,
    /// Custom headers to include on every request.
    headers: HashMap<String, String>,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a webhook notifier targeting `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            client: reqwest::Client::new(),
        }
    }

    /// Attach static headers sent with every delivery (e.g. auth tokens).
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

#[async_trait]
impl RegressionNotifier for WebhookNotifier {
    async fn notify(&self, alert: &RegressionAlert) -> Result<(), NotifyError> {
        let body = serde_json::to_string(alert)
            .map_err(|e| NotifyError::Config(format!("failed to serialize alert: {e}")))?;

        let mut request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);

        for (key, value) in &self.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                url = %self.url,
                %status,
                body = %body_text,
                "webhook returned non-2xx status"
            );
            return Err(NotifyError::Delivery(format!(
                "webhook returned {status}: {body_text}"
            )));
        }

        tracing::debug!(
            url = %self.url,
            git_ref = %alert.git_ref,
            compared_git_ref = %alert.compared_git_ref,
            "regression alert delivered"
        );

        Ok(())
    }

    fn channel_name(&self) -> &str {
        "webhook"
    }
}
