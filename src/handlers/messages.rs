use teloxide::prelude::*;

use crate::handlers::actions::Action;
use crate::handlers::commands::{perform_action, send};
use crate::handlers::replies;
use crate::handlers::HandlerResult;
use crate::tracker::Tracker;

/// Plain text: menu buttons first, then the active wizard if there is one.
pub async fn message_handler(bot: Bot, msg: Message, tracker: Tracker) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;

    if let Some(action) = Action::from_menu_button(text) {
        return perform_action(&bot, chat_id, action, &tracker).await;
    }

    // Known commands never reach this handler.
    if text.starts_with('/') {
        return send(&bot, chat_id, replies::unknown_command()).await;
    }

    let reply = match tracker.handle_reply(chat_id, text).await {
        Ok(Some(reply)) => replies::wizard_reply(&reply),
        Ok(None) => replies::idle_hint(),
        Err(e) => replies::tracker_error(e),
    };

    send(&bot, chat_id, reply).await
}
