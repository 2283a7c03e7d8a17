//! Report delivery
//!
//! [`Notifier`] is the delivery seam. [`WebhookNotifier`] posts the report as
//! `{from, to, subject, body}` JSON to a mail relay endpoint and retries with
//! exponential backoff.

use crate::config::{defaults, DeliveryConfig};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("delivery configuration incomplete: {0}")]
    Incomplete(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("relay returned status {0}")]
    Status(u16),
    #[error("delivery failed after {attempts} attempt(s): {last}")]
    Exhausted { attempts: u32, last: String },
}

/// Delivers messages to a recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), NotifyError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Mail relay client.
pub struct WebhookNotifier {
    http: reqwest::Client,
    url: String,
    from: String,
    to: String,
    max_attempts: u32,
    initial_delay_ms: u64,
}

impl WebhookNotifier {
    /// Build from delivery config. Sender, recipient and URL must all be set.
    pub fn from_config(config: &DeliveryConfig) -> Result<Self, NotifyError> {
        let required = |value: &Option<String>, key: &str| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| NotifyError::Incomplete(format!("{key} is not set")))
        };
        let url = required(&config.webhook_url, "delivery.webhook_url")?;
        let from = required(&config.sender, "delivery.sender")?;
        let to = required(&config.recipient, "delivery.recipient")?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            from,
            to,
            max_attempts: config.max_attempts.max(1),
            initial_delay_ms: config.initial_retry_delay_ms,
        })
    }

    pub fn recipient(&self) -> &str {
        &self.to
    }

    /// Delay before retry number `attempt` (1-based), doubling up to the cap.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let ms = self
            .initial_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)))
            .min(defaults::DELIVERY_MAX_RETRY_DELAY_MS);
        Duration::from_millis(ms)
    }

    async fn post_once(&self, message: &Message) -> Result<(), NotifyError> {
        let payload = RelayPayload {
            from: &self.from,
            to: &self.to,
            subject: &message.subject,
            body: &message.body,
        };
        let resp = self.http.post(&self.url).json(&payload).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(status.as_u16()))
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let mut last = String::new();
        for attempt in 1..=self.max_attempts {
            match self.post_once(message).await {
                Ok(()) => {
                    info!(recipient = %self.to, attempt, "Report delivered");
                    return Ok(());
                }
                Err(e) => {
                    last = e.to_string();
                    if attempt < self.max_attempts {
                        let delay = self.retry_delay(attempt);
                        warn!(
                            attempt,
                            max_attempts = self.max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Delivery failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
        Err(NotifyError::Exhausted {
            attempts: self.max_attempts,
            last,
        })
    }

    fn name(&self) -> &str {
        "webhook"
    }
}
