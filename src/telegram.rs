use async_trait::async_trait;
use teloxide::prelude::*;

use crate::appsettings::TelegramSettings;
use crate::notify::{NOTIFICATION_TITLE, Notification, Notifier};

pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Verifies the token with one `get_me` round trip before the channel
    /// is handed out.
    pub async fn connect(settings: &TelegramSettings) -> anyhow::Result<Self> {
        let bot = Bot::new(settings.token.clone());
        let me = bot.get_me().await?;
        log::info!("Telegram delivery channel ready, bot @{}", me.username());

        Ok(Self {
            bot,
            chat_id: ChatId(settings.chat_id),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn dispatch(&self, note: &Notification) -> anyhow::Result<()> {
        let message = format!("{NOTIFICATION_TITLE}\n{}", note.body);
        self.bot.send_message(self.chat_id, message).await?;

        Ok(())
    }
}
