//! A client for sending notifications through the Telegram Bot API.

use crate::channels::ChatCredentials;
use crate::core::ChatNotifier;
use crate::notification::NotifyError;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{error, info, instrument};

pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Sends messages to a single chat via the bot `sendMessage` method.
pub struct TelegramClient {
    http: reqwest::Client,
    api_base: String,
    credentials: ChatCredentials,
}

impl TelegramClient {
    /// Creates a new `TelegramClient`.
    pub fn new(http: reqwest::Client, api_base: &str, credentials: ChatCredentials) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    // The bot token is part of the path, so this URL must never be logged.
    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.credentials.token)
    }
}

#[async_trait]
impl ChatNotifier for TelegramClient {
    fn name(&self) -> &str {
        "telegram"
    }

    #[instrument(skip(self, text), fields(chat_id = %self.credentials.chat_id))]
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let payload = json!({ "text": text, "chat_id": self.credentials.chat_id });

        let response = self
            .http
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                // reqwest includes the URL in its Display output.
                let e = e.without_url();
                error!(error = %e, "HTTP request to Telegram failed");
                e
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!(status = %status, error = %e, "Telegram returned an unreadable response");
            e
        })?;

        if body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            info!("Successfully sent message to Telegram.");
            Ok(())
        } else {
            let description = body
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("no description")
                .to_string();
            error!(status = %status, description = %description, "Telegram rejected the message");
            Err(NotifyError::NotOk(description))
        }
    }
}
