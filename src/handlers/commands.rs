use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

use crate::handlers::actions::Action;
use crate::handlers::replies;
use crate::handlers::utils::main_menu_keyboard;
use crate::handlers::HandlerResult;
use crate::tracker::Tracker;
use crate::Command;

pub async fn command_handler(bot: Bot, msg: Message, cmd: Command, tracker: Tracker) -> HandlerResult {
    let chat_id = msg.chat.id;

    match Action::try_from(cmd) {
        Ok(action) => perform_action(&bot, chat_id, action, &tracker).await,
        Err(usage) => {
            log::debug!("Malformed command from {}: {}", chat_id, usage);
            send(&bot, chat_id, replies::usage_error(usage)).await
        }
    }
}

/// Shared by slash commands and the reply-keyboard buttons.
pub async fn perform_action(bot: &Bot, chat_id: ChatId, action: Action, tracker: &Tracker) -> HandlerResult {
    let text = match action {
        Action::Start => {
            tracker.register(chat_id).await;
            bot.send_message(chat_id, replies::start_text())
                .parse_mode(ParseMode::MarkdownV2)
                .reply_markup(main_menu_keyboard())
                .await?;
            return Ok(());
        }
        Action::Help => replies::help_text(),
        Action::SetProfile => replies::wizard_prompt(tracker.begin_profile(chat_id).await),
        Action::Cancel => replies::cancelled(tracker.cancel(chat_id).await),
        Action::SetCity(city) => match tracker.set_city(chat_id, &city).await {
            Ok(()) => replies::city_saved(&city),
            Err(e) => replies::tracker_error(e),
        },
        Action::LogWater { amount_ml } => match tracker.log_water(chat_id, amount_ml).await {
            Ok(logged) => replies::water_logged(&logged),
            Err(e) => replies::tracker_error(e),
        },
        Action::LogFood { product } => match tracker.log_food(chat_id, &product).await {
            Ok(prompt) => replies::food_prompt(&prompt),
            Err(e) => replies::tracker_error(e),
        },
        Action::LogWorkout { kind, minutes } => match tracker.log_workout(chat_id, &kind, minutes).await {
            Ok(logged) => replies::workout_logged(&logged),
            Err(e) => replies::tracker_error(e),
        },
        Action::CheckProgress => match tracker.check_progress(chat_id).await {
            Ok(report) => replies::progress(&report),
            Err(e) => replies::tracker_error(e),
        },
    };

    send(bot, chat_id, text).await
}

pub(crate) async fn send(bot: &Bot, chat_id: ChatId, text: String) -> HandlerResult {
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .await?;
    Ok(())
}
