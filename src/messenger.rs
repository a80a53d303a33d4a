use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;

use crate::handlers::utils::main_menu_keyboard;

/// Доставка сообщений в чат.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// `with_menu` прикрепляет постоянную клавиатуру со Старт/Стоп.
    async fn send(&self, chat_id: ChatId, text: &str, with_menu: bool) -> anyhow::Result<()>;
}

pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: ChatId, text: &str, with_menu: bool) -> anyhow::Result<()> {
        let request = self.bot.send_message(chat_id, text);
        if with_menu {
            request.reply_markup(main_menu_keyboard()).await?;
        } else {
            request.await?;
        }
        Ok(())
    }
}

/// Отправка из таймеров: ошибку только логируем, цепочка продолжается.
pub async fn send_logged(messenger: &dyn Messenger, chat_id: ChatId, text: &str) {
    match messenger.send(chat_id, text, false).await {
        Ok(()) => log::debug!("📨 Sent to {}", chat_id),
        Err(e) => log::error!("❌ Failed to send to {}: {}", chat_id, e),
    }
}
