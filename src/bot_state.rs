use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::Timings;
use crate::database::Store;
use crate::llm::TextModel;
use crate::messenger::Messenger;
use crate::scheduler::{Jitter, RandomJitter, SessionRegistry};

/// Счётчики перезапусков планировщиков, общие для всех чатов. Пишутся в лог
/// при каждом перевзводе.
#[derive(Debug, Default)]
pub struct SchedulerStats {
    cycle_arms: AtomicUsize,
    daily_arms: AtomicUsize,
}

impl SchedulerStats {
    pub fn record_cycle_arm(&self) {
        self.cycle_arms.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_daily_arm(&self) {
        self.daily_arms.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cycle_arms(&self) -> usize {
        self.cycle_arms.load(Ordering::Relaxed)
    }

    pub fn daily_arms(&self) -> usize {
        self.daily_arms.load(Ordering::Relaxed)
    }
}

/// Всё, что нужно обработчикам и таймерам. Дешёво клонируется.
#[derive(Clone)]
pub struct BotState {
    pub store: Store,
    pub messenger: Arc<dyn Messenger>,
    pub model: Arc<dyn TextModel>,
    pub sessions: SessionRegistry,
    pub jitter: Arc<dyn Jitter>,
    pub timings: Timings,
    pub stats: Arc<SchedulerStats>,
}

impl BotState {
    pub fn new(store: Store, messenger: Arc<dyn Messenger>, model: Arc<dyn TextModel>, timings: Timings) -> Self {
        Self {
            store,
            messenger,
            model,
            sessions: SessionRegistry::new(),
            jitter: Arc::new(RandomJitter),
            timings,
            stats: Arc::new(SchedulerStats::default()),
        }
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn Jitter>) -> Self {
        self.jitter = jitter;
        self
    }
}
