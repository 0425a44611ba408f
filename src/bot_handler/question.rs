use futures::{StreamExt, stream};

use crate::{
    assistant::DocumentContent,
    bot_handler::{BotHandlerResult, commands::Context},
    drive::DocumentRef,
};

/// Answers a free-text question from the first documents of the folder.
pub async fn handle(ctx: Context<'_>, question: &str) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let messaging = &ctx.handler.messaging_service;
    tracing::debug!("Handling question from user {}", ctx.user_id.0);

    messaging.send_searching_msg(chat_id).await?;

    let documents = match ctx.handler.documents.list_documents().await {
        Ok(documents) => documents,
        Err(e) => {
            tracing::error!("Failed to list documents: {e}");
            messaging.send_error_msg(chat_id, &format!("Failed to load documents: {e}")).await?;
            return Ok(());
        }
    };

    if documents.is_empty() {
        messaging.send_no_documents_msg(chat_id).await?;
        return Ok(());
    }

    let max_documents = ctx.handler.limits.max_search_documents;
    let contents: Vec<DocumentContent> = stream::iter(documents.into_iter().take(max_documents))
        .map(|document| fetch_document(ctx, document))
        .buffered(max_documents.max(1))
        .collect()
        .await;

    match ctx.handler.responder.answer(question, &contents).await {
        Ok(answer) => messaging.send_answer_msg(chat_id, &answer, &contents).await?,
        Err(e) => {
            tracing::error!("Failed to answer question: {e}");
            messaging.send_error_msg(chat_id, &format!("Error processing request: {e}")).await?
        }
    }

    Ok(())
}

/// Fetches the text of a document. A failed fetch is reported inline as the
/// document's content so the remaining documents can still be used.
async fn fetch_document(ctx: Context<'_>, document: DocumentRef) -> DocumentContent {
    let content = match ctx.handler.documents.fetch_content(&document).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to fetch {} ({}): {e}", document.name, document.id);
            format!("Failed to fetch content: {e}")
        }
    };

    DocumentContent { name: document.name, content, link: document.web_view_link }
}
