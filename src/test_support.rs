//! Тестовые двойники внешних сервисов.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use teloxide::types::{ChatId, Message};

use crate::bot_state::BotState;
use crate::config::Timings;
use crate::database::Store;
use crate::llm::{LlmError, TextModel};
use crate::messenger::Messenger;
use crate::scheduler::Jitter;

#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<(ChatId, String, bool)>>,
    failing: AtomicBool,
}

impl RecordingMessenger {
    pub fn sent(&self) -> Vec<(ChatId, String, bool)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text, _)| text).collect()
    }

    pub fn fail_sends(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, chat_id: ChatId, text: &str, with_menu: bool) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("chat {chat_id} blocked the bot");
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string(), with_menu));
        Ok(())
    }
}

/// Отвечает по очереди заготовленными ответами и запоминает промпты
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply.map_err(LlmError::Api),
            None => Err(LlmError::Empty),
        }
    }
}

/// Добавки по кругу из заданного списка
pub struct FixedJitter {
    values: Vec<Duration>,
    next: AtomicUsize,
}

impl FixedJitter {
    pub fn constant(value: Duration) -> Self {
        Self::sequence(vec![value])
    }

    pub fn sequence(values: Vec<Duration>) -> Self {
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }
}

impl Jitter for FixedJitter {
    fn offset(&self, _span: Duration) -> Duration {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.values[i % self.values.len()]
    }
}

/// Текстовое сообщение из личного чата, как его присылает Telegram
pub fn text_message(chat_id: ChatId, text: &str) -> Message {
    serde_json::from_value(serde_json::json!({
        "message_id": 1,
        "date": 1_700_000_000,
        "chat": {"id": chat_id.0, "type": "private", "first_name": "Test"},
        "from": {"id": chat_id.0, "is_bot": false, "first_name": "Test"},
        "text": text,
    }))
    .unwrap()
}

pub fn cards_json(words: &[&str]) -> String {
    let items: Vec<String> = words
        .iter()
        .map(|w| format!(r#"{{"word":"{w}","trans":"[{w}]","translation":"{w}-uk"}}"#))
        .collect();
    format!("Here you go:\n[{}]\nEnjoy!", items.join(","))
}

pub fn test_state(replies: Vec<Result<String, String>>) -> (tempfile::TempDir, BotState, Arc<RecordingMessenger>) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::new(dir.path().join("brain.json"));
    let messenger = Arc::new(RecordingMessenger::default());
    let state = BotState::new(
        store,
        messenger.clone(),
        Arc::new(ScriptedModel::new(replies)),
        Timings::default(),
    );
    (dir, state, messenger)
}
