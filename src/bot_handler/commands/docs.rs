use crate::bot_handler::{BotHandlerResult, commands::Context};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    let chat_id = ctx.message.chat.id;
    let messaging = &ctx.handler.messaging_service;

    messaging.send_loading_documents_msg(chat_id).await?;

    match ctx.handler.documents.list_documents().await {
        Ok(documents) if documents.is_empty() => messaging.send_no_documents_msg(chat_id).await?,
        Ok(documents) => {
            messaging
                .send_documents_msg(chat_id, &documents, ctx.handler.limits.max_listed_documents)
                .await?
        }
        Err(e) => {
            tracing::error!("Failed to list documents: {e}");
            messaging.send_error_msg(chat_id, &format!("Failed to load documents: {e}")).await?
        }
    }

    Ok(())
}
