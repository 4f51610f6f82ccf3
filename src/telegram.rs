use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Serialize;

use crate::poller::Notifier;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Client for the Telegram Bot API, scoped to a single destination chat.
pub struct TelegramClient {
    client: reqwest::Client,
    chat_id: String,
    send_message_url: String,
}

impl TelegramClient {
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_api_base(token, chat_id, TELEGRAM_API_BASE)
    }

    /// Point the client at a different API host.
    pub fn with_api_base(token: String, chat_id: String, api_base: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            chat_id,
            send_message_url: format!("{}/bot{}/sendMessage", api_base, token),
        }
    }

    /// Send a plain-text message to the configured chat.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(&self.send_message_url)
            .json(&request)
            .send()
            .await
            .context("Failed to send Telegram message request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .context("Failed to read error response body")?;
            return Err(anyhow!("Telegram API error: {} - {}", status, error_text));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramClient {
    async fn notify(&self, text: &str) -> Result<()> {
        self.send_message(text).await
    }
}
