pub mod brain;
pub mod flashcard;
pub mod user_state;

pub use brain::Brain;
pub use flashcard::{format_card, format_cards, Flashcard};
pub use user_state::UserState;
