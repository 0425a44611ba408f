#![warn(missing_docs)]
//! A Telegram bot answering employees' questions about a Google Drive folder.
//!
//! Only users listed in the user database may talk to the bot. A question is
//! answered by a chat completion model from the text of the first documents
//! of the folder, followed by the list of documents used.

/// The allow-list of users who may use the bot.
pub mod access;
/// Answering questions with a chat completion model.
pub mod assistant;
/// The main handler for the bot's logic.
pub mod bot_handler;
/// The configuration for the application.
pub mod config;
/// The dispatcher for routing updates to the correct handlers.
pub mod dispatcher;
/// Listing and reading documents from Google Drive.
pub mod drive;
/// The service for sending messages to the user.
pub mod messaging;
/// The storage layer for persisting users.
pub mod storage;

use std::{path::Path, sync::Arc};

use teloxide::prelude::*;

use crate::{
    access::AccessList,
    assistant::{CompletionResponder, openai::OpenAiClient},
    bot_handler::{BotHandler, DocumentLimits},
    config::Config,
    drive::{DriveDocumentSource, auth::TokenProvider, client::GoogleDriveClient},
    messaging::TelegramMessagingService,
    storage::{UserEntity, UserStorage, sqlite::SqliteStorage},
};

/// Runs the bot.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let storage = Arc::new(SqliteStorage::new(&config.database_url).await?);
    let admin = UserEntity::new(
        config.admin.tg_id,
        config.admin.name.clone(),
        config.admin.department.clone(),
        config.admin.role.clone(),
    );
    if storage.seed_user(&admin).await? {
        tracing::info!("Seeded admin user {}", admin.tg_id);
    }
    let access = Arc::new(AccessList::load(storage.clone()).await?);

    let http_client = reqwest::Client::new();
    let token_provider = Arc::new(
        TokenProvider::from_files(
            http_client.clone(),
            Path::new(&config.google_credentials_path),
            Path::new(&config.google_token_path),
        )
        .await?,
    );
    let drive_client = Arc::new(GoogleDriveClient::new(http_client.clone(), token_provider));
    let documents = Arc::new(DriveDocumentSource::new(drive_client, config.drive_folder_id.clone()));

    let completion = Arc::new(OpenAiClient::new(
        http_client,
        &config.openai_api_key,
        &config.openai_api_url,
        &config.openai_model,
    ));
    let responder = Arc::new(CompletionResponder::new(completion, config.max_content_chars));

    let bot = Bot::new(config.telegram_bot_token.clone());
    let messaging_service = Arc::new(TelegramMessagingService::new(bot.clone()));
    let limits = DocumentLimits {
        max_search_documents: config.max_search_documents,
        max_listed_documents: config.max_listed_documents,
    };
    let handler = Arc::new(BotHandler::new(
        messaging_service,
        storage,
        access,
        documents,
        responder,
        limits,
    ));

    let mut dispatcher = dispatcher::BotDispatcher::new(handler).build(bot);
    tracing::debug!("Dispatcher built successfully.");

    dispatcher.dispatch().await;

    Ok(())
}
