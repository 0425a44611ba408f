use std::sync::Arc;

use serde_json::json;
use teloxide::types::{ChatId, Message};

use crate::{
    access::AccessList,
    assistant::MockQueryResponder,
    bot_handler::{BotHandler, BotHandlerResult, Command, DocumentLimits},
    drive::{DocumentRef, MockDocumentSource},
    messaging::MockMessagingService,
    storage::{MockUserStorage, UserEntity},
};

pub const CHAT_ID: ChatId = ChatId(123);
pub const EMPLOYEE_ID: u64 = 100;
pub const ADMIN_ID: u64 = 200;
pub const STRANGER_ID: u64 = 300;

pub const LIMITS: DocumentLimits =
    DocumentLimits { max_search_documents: 5, max_listed_documents: 10 };

// Test harness to encapsulate common test setup and actions.
pub struct TestHarness {
    bot_handler: BotHandler,
}

impl TestHarness {
    // Creates a new TestHarness with mock services.
    pub async fn new(
        mock_messaging: MockMessagingService,
        mock_storage: MockUserStorage,
        mock_documents: MockDocumentSource,
        mock_responder: MockQueryResponder,
    ) -> Self {
        let storage = Arc::new(mock_storage);
        let access = Arc::new(AccessList::load(storage.clone()).await.unwrap());
        let bot_handler = BotHandler::new(
            Arc::new(mock_messaging),
            storage,
            access,
            Arc::new(mock_documents),
            Arc::new(mock_responder),
            LIMITS,
        );

        Self { bot_handler }
    }

    // Simulates a command sent by `user_id`.
    pub async fn handle_command(&self, user_id: u64, command: Command) -> BotHandlerResult<()> {
        let msg = mock_message(CHAT_ID, Some(user_id), &format!("/{command:?}").to_lowercase());
        self.bot_handler.handle_commands(&msg, command).await
    }

    // Simulates a plain text message sent by `user_id`.
    pub async fn handle_text(&self, user_id: u64, text: &str) -> BotHandlerResult<()> {
        let msg = mock_message(CHAT_ID, Some(user_id), text);
        self.bot_handler.handle_text(&msg).await
    }

    // Simulates a message without a sender, as in channel posts.
    pub async fn handle_anonymous_text(&self, text: &str) -> BotHandlerResult<()> {
        let msg = mock_message(CHAT_ID, None, text);
        self.bot_handler.handle_text(&msg).await
    }
}

// A store knowing one regular employee and one admin.
pub fn mock_storage() -> MockUserStorage {
    let users = vec![
        UserEntity::new(EMPLOYEE_ID as i64, "Employee", "Sales", "manager"),
        UserEntity::new(ADMIN_ID as i64, "Boss", "admin", "admin"),
    ];

    let mut storage = MockUserStorage::new();
    let ids = users.iter().map(|u| u.tg_id).collect::<std::collections::HashSet<_>>();
    storage.expect_get_user_ids().returning(move || Ok(ids.clone()));
    storage
        .expect_get_user()
        .returning(move |id| Ok(users.iter().find(|u| u.tg_id == id).cloned()));
    storage
}

pub fn doc_ref(index: usize) -> DocumentRef {
    DocumentRef {
        id: format!("doc-{index}"),
        name: format!("Document {index}"),
        mime_type: "application/vnd.google-apps.document".to_string(),
        web_view_link: format!("https://docs.google.com/document/d/doc-{index}/edit"),
    }
}

// Builds a private chat message the same way Telegram serializes it.
pub fn mock_message(chat_id: ChatId, user_id: Option<u64>, text: &str) -> Message {
    let mut value = json!({
        "message_id": 1,
        "date": 1_700_000_000,
        "chat": { "id": chat_id.0, "type": "private", "first_name": "Test" },
        "text": text,
    });
    if let Some(id) = user_id {
        value["from"] = json!({ "id": id, "is_bot": false, "first_name": "Test" });
    }

    serde_json::from_value(value).unwrap()
}
