mod commands;
mod question;
#[cfg(test)]
mod test_helpers;

use std::sync::Arc;

use teloxide::{
    types::{Message, UserId},
    utils::command::BotCommands,
};
use thiserror::Error;

use crate::{
    access::AccessList,
    assistant::QueryResponder,
    bot_handler::commands::Context,
    drive::DocumentSource,
    messaging::{MessagingError, MessagingService},
    storage::{StorageError, UserStorage},
};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start working with the bot.")]
    Start,
    #[command(description = "Show this help text.")]
    Help,
    #[command(description = "Show your Telegram ID.")]
    MyId,
    #[command(description = "List the available documents.")]
    Docs,
    #[command(description = "Search the documents (just type your question).")]
    Search,
    #[command(description = "Admin panel (administrators only).")]
    Admin,
    #[command(description = "List users (administrators only).")]
    Users,
    #[command(description = "Reload the access list (administrators only).")]
    Reload,
}

#[derive(Debug, Error)]
pub enum BotHandlerError {
    #[error("Failed to send message: {0}")]
    SendMessageError(#[from] MessagingError),
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

pub type BotHandlerResult<T> = Result<T, BotHandlerError>;

/// Limits applied to document listing and search.
#[derive(Debug, Clone, Copy)]
pub struct DocumentLimits {
    /// Documents fetched to answer one question.
    pub max_search_documents: usize,
    /// Documents shown by `/docs`.
    pub max_listed_documents: usize,
}

/// Routes incoming messages to the services.
pub struct BotHandler {
    messaging_service: Arc<dyn MessagingService>,
    user_storage: Arc<dyn UserStorage>,
    access: Arc<AccessList>,
    documents: Arc<dyn DocumentSource>,
    responder: Arc<dyn QueryResponder>,
    limits: DocumentLimits,
}

impl BotHandler {
    /// Creates a new `BotHandler` instance.
    pub fn new(
        messaging_service: Arc<dyn MessagingService>,
        user_storage: Arc<dyn UserStorage>,
        access: Arc<AccessList>,
        documents: Arc<dyn DocumentSource>,
        responder: Arc<dyn QueryResponder>,
        limits: DocumentLimits,
    ) -> Self {
        Self { messaging_service, user_storage, access, documents, responder, limits }
    }

    /// Dispatches the incoming command to the appropriate handler.
    pub async fn handle_commands(&self, msg: &Message, cmd: Command) -> BotHandlerResult<()> {
        let Some(user_id) = sender_id(msg) else {
            return Ok(());
        };
        let ctx = Context { handler: self, message: msg, user_id };

        // Unlisted users need their id to be added to the database.
        if cmd == Command::MyId {
            return commands::my_id::handle(ctx).await;
        }

        if !self.access.is_authorized(user_id).await {
            tracing::info!("Rejected command {cmd:?} from unauthorized user {}", user_id.0);
            if cmd == Command::Start {
                self.messaging_service.send_access_denied_msg(msg.chat.id).await?;
            }
            return Ok(());
        }

        match cmd {
            Command::Start => commands::start::handle(ctx).await,
            Command::Help => commands::help::handle(ctx).await,
            Command::MyId => commands::my_id::handle(ctx).await,
            Command::Docs => commands::docs::handle(ctx).await,
            Command::Search => commands::search::handle(ctx).await,
            Command::Admin => commands::admin::handle(ctx).await,
            Command::Users => commands::users::handle(ctx).await,
            Command::Reload => commands::reload::handle(ctx).await,
        }
    }

    /// Treats a plain text message as a question about the documents.
    pub async fn handle_text(&self, msg: &Message) -> BotHandlerResult<()> {
        let Some(user_id) = sender_id(msg) else {
            return Ok(());
        };
        if !self.access.is_authorized(user_id).await {
            tracing::info!("Ignored message from unauthorized user {}", user_id.0);
            return Ok(());
        }

        // Unknown commands are not questions.
        let Some(text) = msg.text().filter(|text| !text.starts_with('/')) else {
            return Ok(());
        };

        let ctx = Context { handler: self, message: msg, user_id };
        question::handle(ctx, text).await
    }
}

fn sender_id(msg: &Message) -> Option<UserId> {
    msg.from.as_ref().map(|user| user.id)
}
