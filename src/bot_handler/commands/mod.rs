pub mod admin;
pub mod docs;
pub mod help;
pub mod my_id;
pub mod reload;
pub mod search;
pub mod start;
pub mod users;

use teloxide::types::{Message, UserId};

use crate::bot_handler::BotHandler;

/// Context groups the data needed by all command handlers.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub handler: &'a BotHandler,
    pub message: &'a Message,
    pub user_id: UserId,
}
