use teloxide::types::{KeyboardButton, KeyboardMarkup, ReplyMarkup};

pub const START_LABEL: &str = "▶️ Старт";
pub const STOP_LABEL: &str = "⏹ Стоп";

/// Постоянная клавиатура со Старт/Стоп
pub fn main_menu_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![vec![
            KeyboardButton::new(START_LABEL),
            KeyboardButton::new(STOP_LABEL),
        ]])
        .resize_keyboard()
        .persistent(),
    )
}
