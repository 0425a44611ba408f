use crate::bot_handler::{BotHandlerResult, commands::Context};

use super::admin::ensure_admin;

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    if !ensure_admin(ctx).await? {
        return Ok(());
    }

    let chat_id = ctx.message.chat.id;
    match ctx.handler.user_storage.get_all_users().await {
        Ok(users) => ctx.handler.messaging_service.send_users_msg(chat_id, &users).await?,
        Err(e) => {
            tracing::error!("Failed to list users: {e}");
            ctx.handler
                .messaging_service
                .send_error_msg(chat_id, &format!("Failed to get the list of users: {e}"))
                .await?
        }
    }

    Ok(())
}
