use std::error::Error;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot_state::BotState;
use crate::llm::generate_words;
use crate::models::{format_cards, UserState};
use crate::scheduler::{arm_cycle, schedule_daily};

pub const START_ACK: &str = "🚀 Стартуємо! (24h таймер + динамічний цикл)";
pub const AI_ERROR: &str = "AI Error.";
pub const TODAY_HEADER: &str = "Твої слова на цю добу:";
pub const STOP_ACK: &str = "🛑 Зупинено. До зустрічі!";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Доступні команди:")]
pub enum Command {
    #[command(description = "почати надсилати слова")]
    Start,
    #[command(description = "зупинити розсилку")]
    Stop,
}

pub async fn command_handler(
    msg: Message,
    cmd: Command,
    state: BotState,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    match cmd {
        Command::Start => {
            start_learning(&state, msg.chat.id).await?;
        }
        Command::Stop => stop_learning(&state, msg.chat.id).await?,
    }
    Ok(())
}

/// `/start`: новые слова, сохранение и запуск обоих планировщиков.
///
/// Возвращает `false`, если модель не дала слов; тогда файл не трогается.
pub async fn start_learning(state: &BotState, chat_id: ChatId) -> anyhow::Result<bool> {
    log::info!("🚀 /start from {}", chat_id);
    state.sessions.cancel(chat_id);

    state.messenger.send(chat_id, START_ACK, true).await?;

    let brain = state.store.load().await?;
    let used_words = brain
        .user(chat_id)
        .map(|user| user.used_words.clone())
        .unwrap_or_default();

    let Some(cards) = generate_words(state.model.as_ref(), &used_words).await else {
        state.messenger.send(chat_id, AI_ERROR, false).await?;
        return Ok(false);
    };

    let list = format!("{TODAY_HEADER}\n{}", format_cards(&cards));
    state
        .store
        .update(|brain| {
            let previous = brain
                .user(chat_id)
                .map(|user| user.used_words.clone())
                .unwrap_or_default();
            brain.set_user(chat_id, UserState::activated(previous, cards));
        })
        .await?;

    state.messenger.send(chat_id, &list, false).await?;

    let session = state.sessions.open(chat_id);
    arm_cycle(state.clone(), chat_id, session.clone()).await;
    schedule_daily(state.clone(), chat_id, session);

    Ok(true)
}

/// `/stop`: выключает пользователя и гасит его таймеры. История слов остаётся.
pub async fn stop_learning(state: &BotState, chat_id: ChatId) -> anyhow::Result<()> {
    log::info!("🛑 /stop from {}", chat_id);

    let known = state
        .store
        .update(|brain| match brain.user_mut(chat_id) {
            Some(user) => {
                user.is_active = false;
                true
            }
            None => false,
        })
        .await?;
    if !known {
        log::debug!("No stored state for {}", chat_id);
    }

    state.sessions.close(chat_id);
    state.messenger.send(chat_id, STOP_ACK, true).await?;
    Ok(())
}
