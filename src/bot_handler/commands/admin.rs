use crate::bot_handler::{BotHandlerResult, commands::Context};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    if !ensure_admin(ctx).await? {
        return Ok(());
    }

    ctx.handler.messaging_service.send_admin_panel_msg(ctx.message.chat.id).await?;
    Ok(())
}

/// Checks the admin department and tells the user when they are not an admin.
pub async fn ensure_admin(ctx: Context<'_>) -> BotHandlerResult<bool> {
    if ctx.handler.access.is_admin(ctx.user_id).await? {
        return Ok(true);
    }

    tracing::info!("User {} is not an admin", ctx.user_id.0);
    ctx.handler.messaging_service.send_admin_only_msg(ctx.message.chat.id).await?;
    Ok(false)
}
