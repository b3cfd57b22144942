use crate::bot::callback_data::CallbackAction;
use crate::bot::controller::Event;
use crate::bot::send_reply;
use crate::models::SessionId;
use crate::AppState;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, ChatId};
use tracing::{info, warn};

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    info!("Received callback: {:?}", q.data);
    // Ack first so the button stops spinning while the reseller answers.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!("Failed to answer callback query: {}", e);
    }

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let action = match data.parse::<CallbackAction>() {
        Ok(action) => action,
        Err(e) => {
            warn!("{}", e);
            return Ok(());
        }
    };

    let user_id = q.from.id.0 as i64;
    let chat_id = q
        .message
        .as_ref()
        .map(|msg| msg.chat().id)
        .unwrap_or(ChatId(user_id));
    let session = SessionId::new(chat_id.0, user_id);

    if let Some(reply) = state.controller.handle(session, Event::Action(action)).await {
        send_reply(&bot, chat_id, reply).await;
    }
    Ok(())
}
