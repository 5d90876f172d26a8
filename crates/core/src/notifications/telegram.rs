//! Telegram Bot API chat channel.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;
use std::time::Duration;

use crate::notifications::ChatSender;

/// Default timeout for outbound bot API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL for the Telegram Bot API.
pub const DEFAULT_BOT_API_URL: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// HTTP client for the Telegram Bot API.
///
/// Delivery is best-effort: an unconfigured token, a transport error, or a
/// non-success response all yield `false` without raising. Failures are
/// logged with the response status and body for diagnosis.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    bot_token: Option<String>,
}

impl TelegramClient {
    pub fn new(bot_token: Option<String>) -> Self {
        Self::with_base_url(bot_token, DEFAULT_BOT_API_URL)
    }

    pub fn with_base_url(bot_token: Option<String>, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bot_token,
        }
    }
}

#[async_trait]
impl ChatSender for TelegramClient {
    async fn send(&self, chat_id: &str, text: &str) -> bool {
        let Some(token) = self.bot_token.as_deref() else {
            debug!("Telegram bot token not configured, dropping message");
            return false;
        };

        let url = format!("{}/bot{}/sendMessage", self.base_url, token);
        let request = SendMessageRequest { chat_id, text };

        let response = match self.client.post(&url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Telegram request failed: {}", e);
                return false;
            }
        };

        let status = response.status();
        if status.is_success() {
            return true;
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            "Telegram sendMessage returned {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        );
        false
    }
}
