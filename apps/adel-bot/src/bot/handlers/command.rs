use crate::bot::callback_data::CallbackAction;
use crate::bot::controller::Event;
use crate::bot::send_reply;
use crate::models::SessionId;
use crate::AppState;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info};

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "دستورات فروشگاه Adel:")]
pub enum Command {
    #[command(description = "باز کردن منوی فروشگاه")]
    Start,
    #[command(description = "باز کردن منوی فروشگاه")]
    Menu,
    #[command(description = "راهنمای خرید")]
    Help,
    #[command(description = "نمایش موجودی حساب")]
    Balance,
    #[command(description = "لغو خرید جاری")]
    Cancel,
}

impl From<Command> for Event {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Start | Command::Menu => Event::Menu,
            Command::Help => Event::Action(CallbackAction::Help),
            Command::Balance => Event::Action(CallbackAction::Balance),
            Command::Cancel => Event::Action(CallbackAction::Cancel),
        }
    }
}

/// Slash commands become their events; anything else starting with `/` is
/// dropped so it can never be taken for a player id.
pub fn classify_text(text: &str, bot_username: &str) -> Option<Event> {
    if !text.starts_with('/') {
        return Some(Event::Text(text.to_string()));
    }
    // `/start <deep-link>` still opens the menu.
    let head = text.split_whitespace().next().unwrap_or(text);
    Command::parse(head, bot_username).ok().map(Event::from)
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let session = SessionId::new(msg.chat.id.0, from.id.0 as i64);

    let Some(event) = classify_text(text, &state.bot_username) else {
        debug!(%session, "ignoring unknown command {:?}", text);
        return Ok(());
    };
    if event == Event::Menu {
        info!(%session, "menu opened");
    }

    if let Some(reply) = state.controller.handle(session, event).await {
        send_reply(&bot, msg.chat.id, reply).await;
    }
    Ok(())
}
