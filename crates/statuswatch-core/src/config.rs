use crate::error::{Result, WatchError};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_PERIOD_SECS: u64 = 600;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const BOT_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

// ---------------------------------------------------------------------------
// RawConfig
// ---------------------------------------------------------------------------

/// Unvalidated settings as collected from flags and the environment.
#[derive(Debug, Clone)]
pub struct RawConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub period_secs: u64,
    pub timeout_secs: u64,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            bot_token: None,
            chat_id: None,
            period_secs: DEFAULT_PERIOD_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RawConfig {
    /// Check every required credential and produce the immutable config.
    /// All missing variables are reported at once.
    pub fn validate(self) -> Result<WatchConfig> {
        let api_token = present(self.api_token);
        let bot_token = present(self.bot_token);
        let chat_id = present(self.chat_id);

        let missing: Vec<&str> = [
            (API_TOKEN_VAR, api_token.is_none()),
            (BOT_TOKEN_VAR, bot_token.is_none()),
            (CHAT_ID_VAR, chat_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(api_token), Some(bot_token), Some(chat_id)) = (api_token, bot_token, chat_id)
        else {
            return Err(WatchError::Config(format!(
                "missing required variables: {}",
                missing.join(", ")
            )));
        };

        if self.endpoint.trim().is_empty() {
            return Err(WatchError::Config("endpoint must not be empty".into()));
        }
        if self.period_secs == 0 {
            return Err(WatchError::Config(
                "polling period must be at least one second".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(WatchError::Config(
                "request timeout must be at least one second".into(),
            ));
        }

        Ok(WatchConfig {
            endpoint: self.endpoint.trim().to_string(),
            api_token,
            bot_token,
            chat_id,
            period: Duration::from_secs(self.period_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// WatchConfig
// ---------------------------------------------------------------------------

/// Validated configuration, built once at startup and passed by reference.
#[derive(Clone)]
pub struct WatchConfig {
    pub endpoint: String,
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
    pub period: Duration,
    pub timeout: Duration,
}

impl fmt::Debug for WatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("period", &self.period)
            .field("timeout", &self.timeout)
            .finish()
    }
}
