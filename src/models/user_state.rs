use serde::{Deserialize, Serialize};

use super::Flashcard;

/// Сохраняемое состояние одного чата.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub today_words: Vec<Flashcard>,
    /// Все когда-либо выданные слова, только дописываются
    #[serde(default)]
    pub used_words: Vec<String>,
}

impl UserState {
    /// Новое активное состояние: история сохраняется, к ней дописываются новые слова.
    pub fn activated(previous_used: Vec<String>, cards: Vec<Flashcard>) -> Self {
        let mut state = Self {
            is_active: true,
            today_words: Vec::new(),
            used_words: previous_used,
        };
        state.replace_today(cards);
        state
    }

    pub fn replace_today(&mut self, cards: Vec<Flashcard>) {
        self.used_words.extend(cards.iter().map(|c| c.word.clone()));
        self.today_words = cards;
    }

    pub fn card_at(&self, index: usize) -> Option<&Flashcard> {
        self.today_words.get(index)
    }
}
