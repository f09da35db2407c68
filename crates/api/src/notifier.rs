//! Mail relay transport for outbound notices.

use std::sync::Arc;

use async_trait::async_trait;
use eyre::{Result, WrapErr, eyre};
use slotdesk_core::notify::{LogNotifier, Notice, Notifier};
use tracing::{debug, info};

/// Posts each notice as JSON (`{kind, to, subject, body}`) to a mail relay.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, notice: &Notice) -> Result<()> {
        debug!(kind = ?notice.kind, to = %notice.to, "Posting notice to mail relay");

        let response = self
            .client
            .post(&self.url)
            .json(notice)
            .send()
            .await
            .wrap_err("Mail relay unreachable")?;

        if !response.status().is_success() {
            return Err(eyre!("Mail relay answered {}", response.status()));
        }

        Ok(())
    }
}

/// Picks the relay when a URL is configured, the log otherwise.
pub fn notifier_from(mail_webhook_url: Option<&str>) -> Arc<dyn Notifier> {
    match mail_webhook_url {
        Some(url) => {
            info!("Delivering notices through mail relay at {}", url);
            Arc::new(WebhookNotifier::new(url))
        }
        None => {
            info!("MAIL_WEBHOOK_URL not set, notices will be logged only");
            Arc::new(LogNotifier)
        }
    }
}
