use std::sync::Arc;

use anyhow::Context;
use teloxide::{prelude::*, utils::command::BotCommands};

mod bot_state;
mod config;
mod goals;
mod handlers;
mod models;
mod nutrition;
mod tracker;
mod weather;

use crate::bot_state::BotState;
use crate::config::Config;
use crate::handlers::{command_handler, message_handler};
use crate::nutrition::StaticNutritionTable;
use crate::tracker::{Tracker, TrackerSettings};
use crate::weather::OpenWeatherClient;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "Доступные команды:")]
pub enum Command {
    #[command(description = "начать работу с ботом")]
    Start,
    #[command(description = "показать помощь")]
    Help,
    #[command(description = "настроить профиль")]
    SetProfile,
    #[command(description = "выпить воду, мл")]
    LogWater(String),
    #[command(description = "записать еду")]
    LogFood(String),
    #[command(description = "тренировка: тип и минуты")]
    LogWorkout(String),
    #[command(description = "прогресс за день")]
    CheckProgress,
    #[command(description = "город для учёта погоды")]
    SetCity(String),
    #[command(description = "отменить ввод")]
    Cancel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Starting water tracker bot...");

    let config = Config::from_env().context("failed to load configuration")?;
    log::debug!("{:?}", config);
    if config.openweather_api_key.is_none() {
        log::warn!(
            "⚠️ OPENWEATHER_API_KEY is not set, goals will use {}°C",
            config.fallback_temperature_c
        );
    }

    let weather = OpenWeatherClient::new(&config).context("failed to build weather client")?;
    let tracker = Tracker::new(
        BotState::new(),
        Arc::new(weather),
        Arc::new(StaticNutritionTable),
        TrackerSettings::from(&config),
    );

    let bot = Bot::new(config.telegram_token.clone());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        log::warn!("⚠️ Could not register command list: {}", e);
    }

    if let Some(max_idle) = config.wizard_timeout() {
        let (bot, tracker) = (bot.clone(), tracker.clone());
        tokio::spawn(async move {
            handlers::expire_wizards_task(bot, tracker, max_idle).await;
        });
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_message().endpoint(message_handler));

    log::info!("🚀 Starting dispatcher...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![tracker])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
