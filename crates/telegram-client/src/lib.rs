//! `telegram-client` — the slice of the Telegram Bot API that `statuswatch`
//! needs: posting a plain text message to a chat.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use telegram_client::BotClient;
//!
//! let bot = BotClient::new("123:ABC")?;
//! let sent = bot.send_message("42", "hello").await?;
//! println!("message id {}", sent.message_id);
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{BotClient, DEFAULT_API_URL};
pub use error::TelegramError;
pub use types::{ApiResponse, SendMessage, SentMessage};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, TelegramError>;
