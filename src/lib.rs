pub mod bot_state;
pub mod config;
pub mod database;
pub mod handlers;
pub mod health;
pub mod llm;
pub mod messenger;
pub mod models;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod test_support;

pub use bot_state::BotState;
