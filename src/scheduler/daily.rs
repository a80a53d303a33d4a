use teloxide::types::ChatId;
use tokio_util::sync::CancellationToken;

use crate::bot_state::BotState;
use crate::llm::generate_words;
use crate::messenger::send_logged;
use crate::models::format_cards;
use crate::scheduler::Timer;

pub const NEW_DAY_BANNER: &str = "☀️ Новий день — нові слова! (Цикл продовжується без зупинки)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    Inactive,
    GenerationFailed,
    StoreFailed,
}

/// Взводит суточное обновление слов. После срабатывания оно взводится снова
/// при любом исходе, пока сессию не закроют.
pub fn schedule_daily(state: BotState, chat_id: ChatId, session: CancellationToken) -> bool {
    state.stats.record_daily_arm();
    let period = state.timings.refresh_period;
    if let Ok(delta) = chrono::Duration::from_std(period) {
        log::info!("📅 Next word refresh for {} at {}", chat_id, chrono::Local::now() + delta);
    }

    let task_state = state.clone();
    let task_session = session.clone();
    let timer = Timer::after(period, &session, async move {
        log::info!("📅 Refresh period elapsed for {}", chat_id);
        let outcome = refresh_words(&task_state, chat_id).await;
        log::info!(
            "📅 Refresh for {} finished: {:?} (daily arms so far: {})",
            chat_id,
            outcome,
            task_state.stats.daily_arms()
        );
        schedule_daily(task_state, chat_id, task_session);
    });

    state.sessions.install_daily(chat_id, &session, timer)
}

/// Генерирует новые слова для активного пользователя и присылает их.
pub async fn refresh_words(state: &BotState, chat_id: ChatId) -> RefreshOutcome {
    let used_words = match state.store.load().await {
        Ok(brain) => match brain.user(chat_id) {
            Some(user) if user.is_active => user.used_words.clone(),
            _ => return RefreshOutcome::Inactive,
        },
        Err(e) => {
            log::error!("❌ Cannot read state for {}: {}", chat_id, e);
            return RefreshOutcome::StoreFailed;
        }
    };

    let Some(cards) = generate_words(state.model.as_ref(), &used_words).await else {
        return RefreshOutcome::GenerationFailed;
    };

    let list = format_cards(&cards);
    let applied = state
        .store
        .update(|brain| match brain.user_mut(chat_id) {
            Some(user) if user.is_active => {
                user.replace_today(cards);
                true
            }
            _ => false,
        })
        .await;

    match applied {
        Ok(true) => {
            send_logged(state.messenger.as_ref(), chat_id, NEW_DAY_BANNER).await;
            send_logged(state.messenger.as_ref(), chat_id, &list).await;
            RefreshOutcome::Refreshed
        }
        Ok(false) => RefreshOutcome::Inactive,
        Err(e) => {
            log::error!("❌ Cannot save new words for {}: {}", chat_id, e);
            RefreshOutcome::StoreFailed
        }
    }
}
