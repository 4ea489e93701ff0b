use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use teloxide::types::ChatId;
use tokio::sync::{Mutex, RwLock};

use crate::models::{ConversationState, UserState};

/// One user's state behind its own lock. Holding the guard serializes every
/// command of that user, including across lookup awaits.
pub type UserSlot = Arc<Mutex<UserState>>;

type UserMap = Arc<RwLock<HashMap<ChatId, UserSlot>>>;

/// Process-lifetime store of per-user state keyed by chat id.
#[derive(Clone, Default)]
pub struct BotState {
    users: UserMap,
}

impl BotState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's slot, creating an empty one on first contact.
    pub async fn slot(&self, chat_id: ChatId) -> UserSlot {
        {
            let users = self.users.read().await;
            if let Some(slot) = users.get(&chat_id) {
                return slot.clone();
            }
        }

        let mut users = self.users.write().await;
        users
            .entry(chat_id)
            .or_insert_with(|| {
                log::debug!("🆕 New user slot for {}", chat_id);
                Arc::new(Mutex::new(UserState::default()))
            })
            .clone()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    /// Resets conversations idle for at least `max_idle` and returns the chats
    /// together with what was discarded. Slots locked by an in-flight command
    /// are skipped; the next sweep will see them again.
    pub async fn expire_stale_conversations(
        &self,
        now: DateTime<Utc>,
        max_idle: chrono::Duration,
    ) -> Vec<(ChatId, ConversationState)> {
        let slots: Vec<(ChatId, UserSlot)> = {
            let users = self.users.read().await;
            users.iter().map(|(id, slot)| (*id, slot.clone())).collect()
        };

        let mut expired = Vec::new();
        for (chat_id, slot) in slots {
            let Ok(mut user) = slot.try_lock() else {
                continue;
            };
            if user.is_stale(now, max_idle) {
                expired.push((chat_id, user.reset_conversation()));
            }
        }

        if !expired.is_empty() {
            log::info!("🧹 Expired {} abandoned conversations", expired.len());
        }

        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slot_is_created_once_per_chat() {
        let state = BotState::new();
        let a = state.slot(ChatId(1)).await;
        let b = state.slot(ChatId(1)).await;
        let c = state.slot(ChatId(2)).await;

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(state.user_count().await, 2);
    }

    #[tokio::test]
    async fn stale_conversations_are_reset() {
        let state = BotState::new();
        let slot = state.slot(ChatId(7)).await;
        slot.lock().await.enter(ConversationState::AwaitingWeight);
        let idle = state.slot(ChatId(8)).await;
        idle.lock().await.ensure_record();

        let later = Utc::now() + chrono::Duration::minutes(45);
        let expired = state
            .expire_stale_conversations(later, chrono::Duration::minutes(30))
            .await;

        assert_eq!(expired, vec![(ChatId(7), ConversationState::AwaitingWeight)]);
        assert!(slot.lock().await.conversation.is_idle());
    }

    #[tokio::test]
    async fn fresh_conversations_survive_sweep() {
        let state = BotState::new();
        let slot = state.slot(ChatId(7)).await;
        slot.lock().await.enter(ConversationState::AwaitingWeight);

        let expired = state
            .expire_stale_conversations(Utc::now(), chrono::Duration::minutes(30))
            .await;

        assert!(expired.is_empty());
        assert_eq!(slot.lock().await.conversation, ConversationState::AwaitingWeight);
    }

    #[tokio::test]
    async fn busy_slots_are_skipped() {
        let state = BotState::new();
        let slot = state.slot(ChatId(7)).await;
        let mut guard = slot.lock().await;
        guard.enter(ConversationState::AwaitingWeight);

        let later = Utc::now() + chrono::Duration::minutes(45);
        let expired = state
            .expire_stale_conversations(later, chrono::Duration::minutes(30))
            .await;

        assert!(expired.is_empty());
        assert_eq!(guard.conversation, ConversationState::AwaitingWeight);
    }
}
