use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Bot API answered with HTTP {0}")]
    Status(u16),

    #[error("Failed to decode Bot API response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bot API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Bot API reported success without a result")]
    MissingResult,
}
