use crate::domain::ports::AnomalyNotifier;
use async_trait::async_trait;
use serde::Serialize;

/// Webhook message payload (Discord-compatible `content` field).
#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// Fire-and-forget anomaly sink posting to a webhook URL.
///
/// Each dispatch uses its own short-lived client; delivery failures are
/// logged and swallowed so reporting can never fail a lookup. With no URL
/// configured the notifier is a no-op.
pub struct WebhookNotifier {
    url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }
}

#[async_trait]
impl AnomalyNotifier for WebhookNotifier {
    async fn notify(&self, text: &str) {
        let url = match self.url.as_deref() {
            Some(url) => url,
            None => {
                tracing::debug!("No webhook configured, dropping anomaly: {}", text);
                return;
            }
        };

        let client = reqwest::Client::new();
        match client
            .post(url)
            .json(&WebhookMessage { content: text })
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                tracing::debug!("Anomaly dispatched to webhook");
            }
            Ok(response) => {
                tracing::warn!(
                    "Webhook rejected anomaly report with status {}",
                    response.status()
                );
            }
            Err(e) => {
                tracing::warn!("Webhook dispatch failed: {}", e);
            }
        }
    }
}
