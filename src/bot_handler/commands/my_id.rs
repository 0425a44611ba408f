use crate::bot_handler::{BotHandlerResult, commands::Context};

pub async fn handle(ctx: Context<'_>) -> BotHandlerResult<()> {
    ctx.handler.messaging_service.send_my_id_msg(ctx.message.chat.id, ctx.user_id).await?;
    Ok(())
}
