pub mod actions;
pub mod commands;
pub mod messages;
pub mod replies;
pub mod utils;

pub use commands::command_handler;
pub use messages::message_handler;

use std::error::Error;

use chrono::Utc;
use teloxide::prelude::*;
use tokio::time;

use crate::tracker::Tracker;

pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Drops wizards nobody answered within `max_idle` and tells the user.
pub async fn expire_wizards_task(bot: Bot, tracker: Tracker, max_idle: chrono::Duration) {
    let mut interval = time::interval(time::Duration::from_secs(60));

    loop {
        interval.tick().await;

        let expired = tracker
            .state()
            .expire_stale_conversations(Utc::now(), max_idle)
            .await;
        log::debug!(
            "🧹 Wizard sweep over {} users, {} expired",
            tracker.state().user_count().await,
            expired.len()
        );

        for (chat_id, abandoned) in expired {
            log::info!("⌛ Wizard {:?} expired for {}", abandoned.step(), chat_id);
            if let Err(e) = commands::send(&bot, chat_id, replies::wizard_expired(abandoned.step())).await {
                log::warn!("⚠️ Could not notify {} about expired wizard: {}", chat_id, e);
            }
        }
    }
}
