use crate::bot_handler::{BotHandlerResult, commands::Context};

use super::admin::ensure_admin;

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    if !ensure_admin(ctx).await? {
        return Ok(());
    }

    let chat_id = ctx.message.chat.id;
    match ctx.handler.access.refresh().await {
        Ok(count) => ctx.handler.messaging_service.send_access_reloaded_msg(chat_id, count).await?,
        Err(e) => {
            tracing::error!("Failed to reload the access list: {e}");
            ctx.handler
                .messaging_service
                .send_error_msg(chat_id, &format!("Failed to reload the access list: {e}"))
                .await?
        }
    }

    Ok(())
}
