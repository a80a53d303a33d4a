use thiserror::Error;

use crate::llm::TextModel;
use crate::models::Flashcard;

/// Сколько последних слов попадает в список исключений
pub const EXCLUDE_WINDOW: usize = 50;

const LEARNER_CONTEXT: &str = "\
Ти вчитель польської мови. Учень: україномовний дорослий, живе в Польщі.
Інтереси: програмування (Full Stack JS), старе авто, маленька дитина, побут.
Задача: 3 польських слова JSON.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON array in model output")]
    NoArray,
    #[error("JSON array does not parse as flashcards: {0}")]
    Json(#[from] serde_json::Error),
}

/// Промпт для модели: контекст ученика, правила и последние использованные слова.
pub fn build_prompt(used_words: &[String]) -> String {
    let start = used_words.len().saturating_sub(EXCLUDE_WINDOW);
    let ignore_list = used_words[start..].join(", ");

    format!(
        "{LEARNER_CONTEXT}

ЗАВДАННЯ:
Згенеруй JSON-масив із 3 (трьох) нових польських слів.
Не використовуй слова: {ignore_list}.

ВИМОГИ ДО ПОЛІВ:
1. \"word\": польське слово.
2. \"trans\": вимова УКРАЇНСЬКИМИ літерами (кирилицею), у квадратних дужках.
   Не можна: символи IPA (наприклад [vdroʒeɲe]).
   Можна: кирилиця (наприклад [вдроженє], [чешьчь]).
3. \"translation\": переклад українською.

Приклад відповіді:
[{{\"word\": \"Dziękuję\", \"trans\": \"[джєнькує]\", \"translation\": \"Дякую\"}}]

ВАЖЛИВО: поверни тільки JSON-масив, без пояснень."
    )
}

/// Вырезает подстроку от первой `[` до последней `]` и разбирает её как карточки.
pub fn extract_flashcards(text: &str) -> Result<Vec<Flashcard>, ExtractError> {
    let start = text.find('[').ok_or(ExtractError::NoArray)?;
    let end = text.rfind(']').ok_or(ExtractError::NoArray)?;
    if end < start {
        return Err(ExtractError::NoArray);
    }

    Ok(serde_json::from_str(&text[start..=end])?)
}

/// Новые карточки или `None`, если модель упала или ответила мусором.
pub async fn generate_words(model: &dyn TextModel, used_words: &[String]) -> Option<Vec<Flashcard>> {
    let prompt = build_prompt(used_words);

    let text = match model.generate_text(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            log::error!("❌ AI error: {e}");
            return None;
        }
    };

    match extract_flashcards(&text) {
        Ok(cards) => {
            log::info!("✨ Generated {} words", cards.len());
            Some(cards)
        }
        Err(e) => {
            log::error!("❌ AI error: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedModel;

    #[test]
    fn test_prompt_excludes_only_last_fifty() {
        let used: Vec<String> = (0..60).map(|i| format!("w{i}")).collect();
        let prompt = build_prompt(&used);
        assert!(prompt.contains("Не використовуй слова: w10, w11,"));
        assert!(prompt.contains("w59."));
        assert!(!prompt.contains("w9,"));
    }

    #[test]
    fn test_prompt_with_short_history() {
        let used = vec!["kot".to_string(), "pies".to_string()];
        let prompt = build_prompt(&used);
        assert!(prompt.contains("Не використовуй слова: kot, pies."));
    }

    #[test]
    fn test_prompt_with_empty_history() {
        let prompt = build_prompt(&[]);
        assert!(prompt.contains("Не використовуй слова: ."));
        assert!(prompt.contains("3 (трьох)"));
    }

    #[test]
    fn test_extract_surrounded_by_commentary() {
        let text = "Ось слова:\n```json\n[{\"word\":\"kot\",\"trans\":\"[кот]\",\"translation\":\"кіт\"}]\n```\nУдачі!";
        let cards = extract_flashcards(text).unwrap();
        assert_eq!(cards, vec![Flashcard::new("kot", "[кот]", "кіт")]);
    }

    #[test]
    fn test_extract_is_greedy_between_outer_brackets() {
        let text = r#"[{"word":"a","trans":"[а]","translation":"x"},{"word":"b","trans":"[б]","translation":"y"}]"#;
        let cards = extract_flashcards(text).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].trans, "[б]");
    }

    #[test]
    fn test_extract_without_brackets() {
        let err = extract_flashcards("Вибач, не можу").unwrap_err();
        assert!(matches!(err, ExtractError::NoArray));
    }

    #[test]
    fn test_extract_reversed_brackets() {
        let err = extract_flashcards("] oops [").unwrap_err();
        assert!(matches!(err, ExtractError::NoArray));
    }

    #[test]
    fn test_extract_invalid_json() {
        let err = extract_flashcards("[not, json]").unwrap_err();
        assert!(matches!(err, ExtractError::Json(_)));
    }

    #[test]
    fn test_extract_keeps_items_with_missing_fields() {
        let cards = extract_flashcards(r#"[{"word":"dom"}]"#).unwrap();
        assert_eq!(cards[0].word, "dom");
        assert_eq!(cards[0].translation, "");
    }

    #[test]
    fn test_extract_rejects_non_objects() {
        assert!(extract_flashcards("[1, 2, 3]").is_err());
    }

    #[tokio::test]
    async fn test_generate_words_success() {
        let model = ScriptedModel::new(vec![Ok(
            r#"[{"word":"kot","trans":"[кот]","translation":"кіт"}]"#.to_string(),
        )]);
        let used = vec!["pies".to_string()];
        let cards = generate_words(&model, &used).await.unwrap();
        assert_eq!(cards.len(), 1);

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("pies"));
    }

    #[tokio::test]
    async fn test_generate_words_model_failure() {
        let model = ScriptedModel::new(vec![Err("quota exceeded".to_string())]);
        assert!(generate_words(&model, &[]).await.is_none());
    }

    #[tokio::test]
    async fn test_generate_words_unparseable_reply() {
        let model = ScriptedModel::new(vec![Ok("no words today".to_string())]);
        assert!(generate_words(&model, &[]).await.is_none());
    }
}
