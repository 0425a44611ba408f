
mod format;

use async_trait::async_trait;
use mockall::automock;
use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId, ParseMode, UserId},
    utils::html,
};
use thiserror::Error;

use crate::{assistant::DocumentContent, drive::DocumentRef, storage::UserEntity};

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("Teloxide API request failed: {0}")]
    TeloxideRequest(#[from] teloxide::RequestError),
}

type Result<T> = std::result::Result<T, MessagingError>;

/// Trait for sending messages to the user.
#[automock]
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Sends the welcome message.
    async fn send_start_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Tells an unknown user that they have no access.
    async fn send_access_denied_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the command reference.
    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the user's own Telegram id.
    async fn send_my_id_msg(&self, chat_id: ChatId, user_id: UserId) -> Result<()>;

    /// Acknowledges a `/docs` request before the folder is listed.
    async fn send_loading_documents_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the first `limit` documents of the folder.
    async fn send_documents_msg(
        &self,
        chat_id: ChatId,
        documents: &[DocumentRef],
        limit: usize,
    ) -> Result<()>;

    /// Tells the user the folder has no readable documents.
    async fn send_no_documents_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Explains how to ask a question.
    async fn send_search_hint_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Acknowledges a question before the documents are fetched.
    async fn send_searching_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends an answer followed by the documents it was based on.
    async fn send_answer_msg(
        &self,
        chat_id: ChatId,
        answer: &str,
        sources: &[DocumentContent],
    ) -> Result<()>;

    /// Tells a non-admin user that the command is for admins only.
    async fn send_admin_only_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the list of admin commands.
    async fn send_admin_panel_msg(&self, chat_id: ChatId) -> Result<()>;

    /// Sends the stored users.
    async fn send_users_msg(&self, chat_id: ChatId, users: &[UserEntity]) -> Result<()>;

    /// Confirms that the allow-list was reloaded.
    async fn send_access_reloaded_msg(&self, chat_id: ChatId, count: usize) -> Result<()>;

    /// Sends an error description to the user.
    async fn send_error_msg(&self, chat_id: ChatId, error: &str) -> Result<()>;
}

/// Telegram messaging service.
pub struct TelegramMessagingService {
    bot: Bot,
}

impl TelegramMessagingService {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    async fn send_html(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.bot
            .send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
            .map_err(MessagingError::TeloxideRequest)
    }
}

#[async_trait]
impl MessagingService for TelegramMessagingService {
    async fn send_start_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, format::START_TEXT.to_string()).await
    }

    async fn send_access_denied_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, "⛔️ Access denied. Please contact your administrator.".into())
            .await
    }

    async fn send_help_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, format::help_text()).await
    }

    async fn send_my_id_msg(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.send_html(chat_id, format!("Your Telegram ID: <code>{}</code>", user_id.0)).await
    }

    async fn send_loading_documents_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, "📚 Loading the list of documents...".into()).await
    }

    async fn send_documents_msg(
        &self,
        chat_id: ChatId,
        documents: &[DocumentRef],
        limit: usize,
    ) -> Result<()> {
        self.send_html(chat_id, format::documents_list(documents, limit)).await
    }

    async fn send_no_documents_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, format::NO_DOCUMENTS_TEXT.to_string()).await
    }

    async fn send_search_hint_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, format::SEARCH_HINT_TEXT.to_string()).await
    }

    async fn send_searching_msg(&self, chat_id: ChatId) -> Result<()> {
        // The typing indicator is cosmetic; a failure here must not abort the search.
        if let Err(e) = self.bot.send_chat_action(chat_id, ChatAction::Typing).await {
            tracing::debug!("Failed to send chat action: {e}");
        }
        self.send_html(chat_id, "🔍 Searching the documents for an answer...".into()).await
    }

    async fn send_answer_msg(
        &self,
        chat_id: ChatId,
        answer: &str,
        sources: &[DocumentContent],
    ) -> Result<()> {
        self.send_html(chat_id, format::answer(answer, sources)).await
    }

    async fn send_admin_only_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, "⛔️ This command is available to administrators only.".into())
            .await
    }

    async fn send_admin_panel_msg(&self, chat_id: ChatId) -> Result<()> {
        self.send_html(chat_id, format::ADMIN_PANEL_TEXT.to_string()).await
    }

    async fn send_users_msg(&self, chat_id: ChatId, users: &[UserEntity]) -> Result<()> {
        self.send_html(chat_id, format::users_list(users)).await
    }

    async fn send_access_reloaded_msg(&self, chat_id: ChatId, count: usize) -> Result<()> {
        self.send_html(chat_id, format!("🔄 Access list reloaded: {count} authorized users."))
            .await
    }

    async fn send_error_msg(&self, chat_id: ChatId, error: &str) -> Result<()> {
        self.send_html(chat_id, format!("❌ {}", html::escape(error))).await
    }
}
