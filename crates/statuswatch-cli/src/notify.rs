use statuswatch_core::{Notifier, NotifyError};
use telegram_client::BotClient;

/// Delivers notifications as Telegram messages; the recipient is a chat id.
pub struct TelegramNotifier {
    bot: BotClient,
}

impl TelegramNotifier {
    pub fn new(bot: BotClient) -> Self {
        Self { bot }
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, recipient: &str, text: &str) -> Result<(), NotifyError> {
        self.bot
            .send_message(recipient, text)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::new(recipient, e))
    }
}
