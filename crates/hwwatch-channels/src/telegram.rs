//! Telegram Bot channel — REST `sendMessage` only.
//!
//! The watcher never listens for updates, so there is no long-polling or
//! webhook side here.

use std::time::Duration;

use async_trait::async_trait;
use hwwatch_core::config::Config;
use hwwatch_core::error::{HwWatchError, Result};
use hwwatch_core::traits::Channel;
use hwwatch_core::types::OutgoingMessage;
use serde::{Deserialize, Serialize};

/// Telegram channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String { "https://api.telegram.org".into() }
fn default_timeout_secs() -> u64 { 30 }

impl From<&Config> for TelegramConfig {
    fn from(config: &Config) -> Self {
        Self {
            bot_token: config.telegram_token.clone(),
            api_url: config.telegram_api_url.clone(),
            timeout_secs: config.request_timeout.as_secs(),
        }
    }
}

/// Telegram Bot channel. Built once and reused for every send.
pub struct TelegramChannel {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HwWatchError::config(format!("Telegram HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.config.api_url, self.config.bot_token)
    }

    /// Send a text message to a chat.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let body = serde_json::json!({ "chat_id": chat_id, "text": text });

        let response = self.client.post(self.method_url("sendMessage")).json(&body).send().await
            .map_err(|e| HwWatchError::notify(format!("Telegram send failed: {}", e.without_url())))?;

        let status = response.status();
        let reply: TelegramReply = response.json().await
            .map_err(|e| HwWatchError::notify(format!("Telegram {status}: unreadable reply: {}", e.without_url())))?;

        if !status.is_success() || !reply.ok {
            let description = reply.description.unwrap_or_default();
            return Err(HwWatchError::notify(format!("Telegram {status}: {description}")));
        }
        Ok(())
    }
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str { "telegram" }

    async fn send(&self, message: OutgoingMessage) -> Result<()> {
        self.send_message(&message.chat_id, &message.text).await
    }
}

// --- Telegram API Types ---

#[derive(Debug, Clone, Deserialize)]
struct TelegramReply {
    ok: bool,
    description: Option<String>,
}
