//! Slack incoming-webhook delivery.
//!
//! One POST per share, no retry. The client carries an explicit timeout so a
//! stalled webhook cannot hold the request open indefinitely.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sharehub_core::config::SlackConfig;
use tracing::{debug, warn};

use crate::error::ShareError;

const USER_AGENT: &str = concat!("sharehub/", env!("CARGO_PKG_VERSION"));

/// Slack payload, posted to the webhook as-is: `{"icon": "...", "text": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slack {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub text: String,
}

impl Slack {
    /// Post this message. Empty `text` is rejected before any network call.
    pub async fn share(&self, webhook: &SlackWebhook) -> Result<(), ShareError> {
        if self.text.is_empty() {
            return Err(ShareError::MissingArgument { field: "Text" });
        }
        webhook.post(self).await
    }
}

/// HTTP client bound to the configured webhook URL.
///
/// Built once at startup and shared by every request. The URL is not
/// validated here; an empty or malformed one fails at send time.
#[derive(Debug, Clone)]
pub struct SlackWebhook {
    client: reqwest::Client,
    url: String,
}

impl SlackWebhook {
    pub fn new(config: &SlackConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.webhook_url.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    /// Send one message. Any transport failure or non-2xx status is
    /// reported as [`ShareError::SlackUnreachable`].
    pub async fn post(&self, message: &Slack) -> Result<(), ShareError> {
        let resp = self
            .client
            .post(&self.url)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "slack webhook request failed");
                ShareError::SlackUnreachable {
                    reason: e.to_string(),
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = %status, "slack webhook rejected the message");
            return Err(ShareError::SlackUnreachable {
                reason: format!("webhook returned {status}"),
            });
        }

        debug!(status = %status, "slack message delivered");
        Ok(())
    }
}
