use reqwest::{Client, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, info};

use crate::discord::message::OutboundMessage;
use crate::error::{RelayError, Result};

/// Posts messages to a single Discord webhook.
#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    client: Client,
    webhook_url: Url,
}

impl DiscordNotifier {
    pub fn new(webhook_url: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("commit-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Sends one message. Discord answers an accepted webhook call with 204;
    /// every other status counts as a failure. Nothing is retried.
    pub async fn send(&self, message: &OutboundMessage) -> Result<()> {
        debug!("📤 Posting {} bytes to Discord", message.content.len());

        let res = self
            .client
            .post(self.webhook_url.clone())
            .json(message)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::NO_CONTENT {
            return Err(RelayError::UnexpectedStatus(status.to_string()));
        }

        info!("✅ Discord accepted the message");
        Ok(())
    }
}
