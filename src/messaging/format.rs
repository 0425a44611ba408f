use teloxide::utils::{command::BotCommands, html};

use crate::{
    assistant::DocumentContent, bot_handler::Command, drive::DocumentRef, storage::UserEntity,
};

pub const START_TEXT: &str = "✅ Hello! I am a bot for working with corporate documents.\n\n\
    📋 Available commands:\n\
    /help — list of commands\n\
    /docs — list of documents\n\
    /search — search the documents\n\
    /myid — show your Telegram ID";

pub const NO_DOCUMENTS_TEXT: &str =
    "📭 No documents found. Check the Google Drive folder settings.";

pub const SEARCH_HINT_TEXT: &str = "🔍 Type your question and I will look for the answer in \
    the documents!\n\n\
    Example questions:\n\
    • How do I request vacation?\n\
    • Which documents are needed for onboarding?\n\
    • Where can I find the report template?";

pub const ADMIN_PANEL_TEXT: &str = "🔧 Admin panel\n\n\
    Available commands:\n\
    /users — list of users\n\
    /reload — reload the access list from the database";

const HELP_FOOTER: &str = "💡 Just type your question and I will find the answer in the documents!";

const SOURCE_BULLET: &str = "•";

pub fn help_text() -> String {
    format!("{}\n\n{HELP_FOOTER}", html::escape(&Command::descriptions().to_string()))
}

/// Numbered list of the first `limit` documents, with a count of the rest.
pub fn documents_list(documents: &[DocumentRef], limit: usize) -> String {
    let mut text = String::from("📚 Available documents:\n\n");

    for (i, doc) in documents.iter().take(limit).enumerate() {
        text.push_str(&format!(
            "{}. {}\n   Type: {}\n   Link: {}\n\n",
            i + 1,
            html::escape(&doc.name),
            doc.kind().label(),
            html::escape(&doc.web_view_link),
        ));
    }

    if documents.len() > limit {
        text.push_str(&format!("... and {} more documents", documents.len() - limit));
    }

    text.trim_end().to_string()
}

/// The answer followed by one source line per document.
pub fn answer(answer: &str, sources: &[DocumentContent]) -> String {
    let source_lines = sources
        .iter()
        .map(|doc| {
            format!("{SOURCE_BULLET} {}: {}", html::escape(&doc.name), html::escape(&doc.link))
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("🤖 Answer:\n\n{}\n\n📄 Sources:\n{source_lines}", html::escape(answer))
}

pub fn users_list(users: &[UserEntity]) -> String {
    if users.is_empty() {
        return "📭 No users found.".to_string();
    }

    let entries = users
        .iter()
        .map(|user| {
            format!(
                "ID: <code>{}</code>\nName: {}\nDepartment: {}\nRole: {}",
                user.tg_id,
                html::escape(&user.name),
                html::escape(&user.department),
                html::escape(&user.role),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("👥 Users:\n\n{entries}")
}
