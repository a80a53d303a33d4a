use std::sync::Arc;

use teloxide::prelude::*;

use flashcards_bot::config::Config;
use flashcards_bot::database::Store;
use flashcards_bot::handlers::{command_handler, message_handler, Command};
use flashcards_bot::llm::GeminiClient;
use flashcards_bot::messenger::TelegramMessenger;
use flashcards_bot::{health, BotState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // .env необязателен
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting Polish flashcards bot...");

    let config = Config::from_env()?;

    let store = Store::new(&config.brain_path);
    let brain = store.load().await?;
    log::info!("✅ Brain loaded from {}: {} users", config.brain_path, brain.users.len());

    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port).await {
            log::error!("Liveness endpoint stopped: {}", e);
        }
    });

    let bot = Bot::new(&config.telegram_token);
    let state = BotState::new(
        store,
        Arc::new(TelegramMessenger::new(bot.clone())),
        Arc::new(GeminiClient::new(&config.gemini_api_key, &config.gemini_model)),
        config.timings.clone(),
    );

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Bot is ready, starting dispatcher");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
