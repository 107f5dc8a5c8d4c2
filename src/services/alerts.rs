//! Best-effort webhook notifications.
//!
//! Delivery failures are logged and swallowed; a broken webhook must never
//! change the outcome of a maintenance run.

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde_json::json;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const WEBHOOK_BUDGET: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct AlertService {
    webhook_url: String,
    message_prefix: String,
    enabled: bool,
    client: Client,
}

impl AlertService {
    pub fn new(webhook_url: String, message_prefix: String, enabled: bool) -> Result<Self> {
        let client = Client::builder().timeout(WEBHOOK_BUDGET).build()?;

        Ok(Self {
            webhook_url,
            message_prefix,
            enabled,
            client,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Post a status message to the webhook. Fire-and-forget: any failure
    /// is downgraded to a warning.
    pub async fn notify(&self, message: &str) {
        if self.webhook_url.is_empty() {
            debug!("no webhook URL configured, skipping notification");
            return;
        }

        let payload = json!({
            "text": format!("{}{}", self.message_prefix, message),
            "link_names": 1,
        });

        match timeout(
            WEBHOOK_BUDGET,
            self.client.post(&self.webhook_url).json(&payload).send(),
        )
        .await
        {
            Ok(Ok(response)) => {
                if response.status().is_success() {
                    info!("notification sent: {}", message);
                } else {
                    warn!(
                        "notification webhook returned status {}",
                        response.status()
                    );
                }
            }
            Ok(Err(e)) => warn!("failed to send notification: {}", e),
            Err(_) => warn!("notification webhook timed out"),
        }
    }
}
