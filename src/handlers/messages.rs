use std::error::Error;

use teloxide::prelude::*;

use crate::bot_state::BotState;
use crate::handlers::commands::{start_learning, stop_learning};
use crate::handlers::utils::{START_LABEL, STOP_LABEL};

pub const MENU_HINT: &str = "Натисни ▶️ Старт, щоб отримувати польські слова, або ⏹ Стоп, щоб зупинитись.";

/// Что делать с обычным текстом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Stop,
    Hint,
    Ignore,
}

pub fn classify_text(text: &str) -> MenuAction {
    match text.trim() {
        START_LABEL => MenuAction::Start,
        STOP_LABEL => MenuAction::Stop,
        // `/start extra`, `/stopnow` и т.п. не разбираются как команды
        t if t.starts_with("/start") => MenuAction::Start,
        t if t.starts_with("/stop") => MenuAction::Stop,
        t if t.starts_with('/') => MenuAction::Ignore,
        _ => MenuAction::Hint,
    }
}

pub async fn message_handler(
    msg: Message,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let chat_id = msg.chat.id;
    let action = msg.text().map_or(MenuAction::Hint, classify_text);

    match action {
        MenuAction::Start => {
            start_learning(&state, chat_id).await?;
        }
        MenuAction::Stop => stop_learning(&state, chat_id).await?,
        MenuAction::Hint => state.messenger.send(chat_id, MENU_HINT, true).await?,
        MenuAction::Ignore => {}
    }
    Ok(())
}
