use std::time::Duration;

use crate::types::{ApiResponse, SendMessage, SentMessage};
use crate::{Result, TelegramError};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ─── BotClient ────────────────────────────────────────────────────────────

/// Bot API client bound to a single bot token.
///
/// The token is part of every request URL, so transport errors are stripped
/// of their URL before they are returned.
pub struct BotClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl BotClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(token, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TelegramError::Http(e.without_url()))?;
        Ok(Self {
            http,
            base_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
        })
    }

    /// Point the client at a different API host (self-hosted Bot API server,
    /// or a mock in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Post `text` to `chat_id`. One attempt, no retry.
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<SentMessage> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let response = self
            .http
            .post(&url)
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TelegramError::Http(e.without_url()))?;

        let envelope: ApiResponse<SentMessage> = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(TelegramError::Status(status.as_u16())),
            Err(source) => {
                return Err(TelegramError::Decode {
                    status: status.as_u16(),
                    source,
                })
            }
        };

        if !envelope.ok {
            return Err(TelegramError::Api {
                code: envelope
                    .error_code
                    .unwrap_or_else(|| i64::from(status.as_u16())),
                description: envelope.description.unwrap_or_default(),
            });
        }

        let sent = envelope.result.ok_or(TelegramError::MissingResult)?;
        tracing::debug!(chat_id, message_id = sent.message_id, "telegram message sent");
        Ok(sent)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
