use serde::{Deserialize, Serialize};

/// Одна карточка: польское слово, произношение кириллицей и перевод.
///
/// Поля по умолчанию пустые: модель иногда теряет поле, и такая карточка
/// всё равно сохраняется и отправляется как есть.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flashcard {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub trans: String,
    #[serde(default)]
    pub translation: String,
}

impl Flashcard {
    pub fn new(word: &str, trans: &str, translation: &str) -> Self {
        Self {
            word: word.to_string(),
            trans: trans.to_string(),
            translation: translation.to_string(),
        }
    }
}

/// Строка карточки в том виде, в каком она уходит в чат
pub fn format_card(card: &Flashcard) -> String {
    format!("🇵🇱 **{}** {} - {}", card.word, card.trans, card.translation)
}

pub fn format_cards(cards: &[Flashcard]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join("\n")
}
