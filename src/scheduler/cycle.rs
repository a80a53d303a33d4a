//! Динамический цикл: три карточки в случайные моменты окна, после третьей
//! цикл сразу взводится заново.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use rand::Rng;
use teloxide::types::ChatId;
use tokio_util::sync::CancellationToken;

use crate::bot_state::BotState;
use crate::config::Timings;
use crate::messenger::send_logged;
use crate::models::format_card;
use crate::scheduler::Timer;

const SLOTS: usize = 3;

/// Источник случайной добавки к задержке.
pub trait Jitter: Send + Sync {
    /// Значение из `[0, span)`
    fn offset(&self, span: Duration) -> Duration;
}

pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn offset(&self, span: Duration) -> Duration {
        let span_ms = span.as_millis() as u64;
        if span_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..span_ms))
    }
}

/// Три задержки `floor + jitter`, отсортированные по возрастанию.
pub fn draw_delays(jitter: &dyn Jitter, timings: &Timings) -> [Duration; SLOTS] {
    let mut delays = timings.floors.map(|floor| floor + jitter.offset(timings.max_span));
    delays.sort();
    delays
}

fn minutes(delay: &Duration) -> String {
    format!("{:.1}", delay.as_secs_f64() / 60.0)
}

/// Взводит цикл для чата и возвращает число запланированных отправок.
///
/// Ноль, если пользователя нет, он выключен или сессию уже закрыли.
/// Таймер последней отправки сам вызывает `arm_cycle` ещё раз.
pub fn arm_cycle(
    state: BotState,
    chat_id: ChatId,
    session: CancellationToken,
) -> Pin<Box<dyn Future<Output = usize> + Send>> {
    Box::pin(async move {
        state.stats.record_cycle_arm();
        if session.is_cancelled() {
            return 0;
        }

        let brain = match state.store.load().await {
            Ok(brain) => brain,
            Err(e) => {
                log::error!("❌ Cycle for {} stopped, store unreadable: {}", chat_id, e);
                return 0;
            }
        };
        if !brain.user(chat_id).is_some_and(|user| user.is_active) {
            log::info!("⏹ Cycle for {} not armed: user inactive", chat_id);
            return 0;
        }

        let delays = draw_delays(state.jitter.as_ref(), &state.timings);
        log::info!(
            "🆕 New cycle for {}: words in {} / {} / {} min",
            chat_id,
            minutes(&delays[0]),
            minutes(&delays[1]),
            minutes(&delays[2]),
        );

        let timers = delays
            .iter()
            .enumerate()
            .map(|(index, delay)| {
                let state = state.clone();
                let session_for_rearm = session.clone();
                Timer::after(*delay, &session, async move {
                    deliver(&state, chat_id, index).await;
                    if index == SLOTS - 1 {
                        log::info!(
                            "🔄 Third word sent to {}, re-arming cycle (arms so far: {})",
                            chat_id,
                            state.stats.cycle_arms()
                        );
                        arm_cycle(state, chat_id, session_for_rearm).await;
                    }
                })
            })
            .collect();

        if state.sessions.install_deliveries(chat_id, &session, timers) {
            SLOTS
        } else {
            0
        }
    })
}

/// Отправляет карточку из позиции `index`, перечитав файл.
async fn deliver(state: &BotState, chat_id: ChatId, index: usize) {
    let brain = match state.store.load().await {
        Ok(brain) => brain,
        Err(e) => {
            log::error!("❌ Cannot read words for {}: {}", chat_id, e);
            return;
        }
    };

    if let Some(card) = brain.user(chat_id).and_then(|user| user.card_at(index)) {
        send_logged(state.messenger.as_ref(), chat_id, &format_card(card)).await;
    }
}
