#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use flashcards_bot::config::Timings;
use flashcards_bot::database::Store;
use flashcards_bot::llm::{LlmError, TextModel};
use flashcards_bot::messenger::Messenger;
use flashcards_bot::scheduler::Jitter;
use flashcards_bot::BotState;
use teloxide::types::ChatId;

#[derive(Default)]
pub struct Outbox {
    sent: Mutex<Vec<(ChatId, String, bool)>>,
}

impl Outbox {
    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, t, _)| t.clone()).collect()
    }

    pub fn with_menu(&self) -> Vec<bool> {
        self.sent.lock().unwrap().iter().map(|(_, _, m)| *m).collect()
    }
}

#[async_trait]
impl Messenger for Outbox {
    async fn send(&self, chat_id: ChatId, text: &str, with_menu: bool) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push((chat_id, text.to_string(), with_menu));
        Ok(())
    }
}

pub struct CannedModel {
    replies: Mutex<VecDeque<String>>,
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextModel for CannedModel {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies.lock().unwrap().pop_front().ok_or(LlmError::Empty)
    }
}

/// Всегда нулевая добавка: отправки через 10, 20 и 30 секунд
pub struct NoJitter;

impl Jitter for NoJitter {
    fn offset(&self, _span: Duration) -> Duration {
        Duration::ZERO
    }
}

pub struct Harness {
    pub dir: tempfile::TempDir,
    pub state: BotState,
    pub outbox: Arc<Outbox>,
    pub model: Arc<CannedModel>,
}

pub fn harness(replies: &[&str]) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let outbox = Arc::new(Outbox::default());
    let model = Arc::new(CannedModel {
        replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
        prompts: Mutex::new(Vec::new()),
    });
    let state = BotState::new(
        Store::new(dir.path().join("brain.json")),
        outbox.clone(),
        model.clone(),
        Timings::default(),
    );
    Harness {
        dir,
        state,
        outbox,
        model,
    }
}

pub const THREE_CARDS: &str = r#"Sure! Here are today's words:
[
  {"word": "samochód", "trans": "[самохуд]", "translation": "автомобіль"},
  {"word": "syn", "trans": "[син]", "translation": "син"},
  {"word": "pralka", "trans": "[пралька]", "translation": "пральна машина"}
]
Good luck!"#;
