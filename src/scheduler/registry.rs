use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use teloxide::types::ChatId;
use tokio_util::sync::CancellationToken;

use super::Timer;

/// Таймеры одного чата. Живут только в памяти процесса.
#[derive(Default)]
struct Session {
    token: CancellationToken,
    deliveries: Vec<Timer>,
    daily: Option<Timer>,
}

impl Session {
    fn cancel(&self) {
        self.token.cancel();
        for timer in &self.deliveries {
            timer.cancel();
        }
        if let Some(daily) = &self.daily {
            daily.cancel();
        }
    }
}

/// Реестр активных сессий по чатам.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<ChatId, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ChatId, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Гасит прежнюю сессию чата (если была) и открывает новую.
    pub fn open(&self, chat_id: ChatId) -> CancellationToken {
        let mut sessions = self.lock();
        if let Some(old) = sessions.remove(&chat_id) {
            old.cancel();
        }
        let session = Session::default();
        let token = session.token.clone();
        sessions.insert(chat_id, session);
        token
    }

    /// Гасит все таймеры чата без открытия новой сессии.
    pub fn cancel(&self, chat_id: ChatId) {
        if let Some(session) = self.lock().get(&chat_id) {
            session.cancel();
        }
    }

    /// Гасит и удаляет сессию. `true`, если она была.
    pub fn close(&self, chat_id: ChatId) -> bool {
        match self.lock().remove(&chat_id) {
            Some(session) => {
                session.cancel();
                true
            }
            None => false,
        }
    }

    /// Заменяет таймеры отправок. Если сессию уже закрыли, таймеры гасятся.
    pub fn install_deliveries(&self, chat_id: ChatId, token: &CancellationToken, timers: Vec<Timer>) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(&chat_id) {
            Some(session) if !token.is_cancelled() => {
                session.deliveries = timers;
                true
            }
            _ => {
                timers.iter().for_each(Timer::cancel);
                false
            }
        }
    }

    pub fn install_daily(&self, chat_id: ChatId, token: &CancellationToken, timer: Timer) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(&chat_id) {
            Some(session) if !token.is_cancelled() => {
                session.daily = Some(timer);
                true
            }
            _ => {
                timer.cancel();
                false
            }
        }
    }

    pub fn is_open(&self, chat_id: ChatId) -> bool {
        self.lock().contains_key(&chat_id)
    }

    /// Сколько таймеров чата ещё ждут срабатывания
    pub fn pending(&self, chat_id: ChatId) -> usize {
        self.lock().get(&chat_id).map_or(0, |session| {
            let daily = session.daily.iter().filter(|t| t.is_pending()).count();
            let deliveries = session.deliveries.iter().filter(|t| t.is_pending()).count();
            daily + deliveries
        })
    }
}
