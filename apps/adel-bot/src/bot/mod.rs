use crate::bot::controller::{ConversationController, Reply};
use crate::bot::handlers::command::Command;
use crate::AppState;
use anyhow::{anyhow, Result};
use teloxide::utils::command::BotCommands;
use teloxide::{dptree, prelude::*, types::{ChatId, Update}};
use tracing::{error, info, warn};

pub mod callback_data;
pub mod controller;
pub mod handlers;
pub mod keyboards;
pub mod messages;

pub async fn run_bot(
    bot: Bot,
    mut shutdown_signal: tokio::sync::broadcast::Receiver<()>,
    controller: ConversationController,
) -> Result<()> {
    info!("Starting bot dispatcher...");

    std::panic::set_hook(Box::new(|info| {
        error!("CRITICAL BOT PANIC: {:?}", info);
    }));

    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow!("bot failed to connect to Telegram: {}", e))?;
    let bot_username = me.username.clone().unwrap_or_default();
    info!("Bot connected as: @{}", bot_username);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    let state = AppState {
        controller,
        bot_username,
    };

    let message_handler = Update::filter_message().endpoint(handlers::command::message_handler);
    let callback_handler =
        Update::filter_callback_query().endpoint(handlers::callback::callback_handler);

    let mut dispatcher = Dispatcher::builder(
        bot,
        dptree::entry()
            .branch(message_handler)
            .branch(callback_handler),
    )
    .dependencies(dptree::deps![state])
    .default_handler(|upd: std::sync::Arc<Update>| async move {
        info!("Unhandled update: {:?}", upd.kind);
    })
    .build();

    tokio::select! {
        _ = dispatcher.dispatch() => {
            info!("Bot dispatcher exited naturally");
        }
        _ = shutdown_signal.recv() => {
            info!("Bot received shutdown signal, stopping...");
        }
    }
    Ok(())
}

/// Delivery failures are logged and dropped; they never reach the dispatcher.
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) {
    let mut req = bot.send_message(chat_id, reply.text);
    if let Some(keyboard) = reply.keyboard {
        req = req.reply_markup(keyboard);
    }
    if let Err(e) = req.await {
        error!(chat_id = chat_id.0, "Failed to send reply: {}", e);
    }
}
