pub mod commands;
pub mod messages;
pub mod utils;

pub use commands::{command_handler, start_learning, stop_learning, Command};
pub use messages::message_handler;
