//! Chat webhook sender.

use std::time::Duration;

use serde::Serialize;

use crate::error::NotifyError;

/// Payload accepted by both Discord (`content`) and Slack (`text`) incoming
/// webhooks.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
    text: &'a str,
    username: &'a str,
}

/// Posts verdict messages to one webhook URL.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    username: String,
}

impl WebhookNotifier {
    /// Creates a notifier for `url`, posting as `username`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str, username: &str, timeout_secs: u64) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: url.to_owned(),
            username: username.to_owned(),
        })
    }

    /// Sends `message` once.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] on connection failure and
    /// [`NotifyError::UnexpectedStatus`] on a non-2xx response.
    pub async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            content: message,
            text: message,
            username: &self.username,
        };
        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    /// Sends `message`, logging and swallowing any failure.
    pub async fn notify_best_effort(&self, message: &str) {
        if let Err(e) = self.notify(message).await {
            tracing::warn!(error = %e, "webhook failed");
        }
    }
}
