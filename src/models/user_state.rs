use chrono::{DateTime, Utc};

use super::{ConversationState, UserProfile, DEFAULT_WEIGHT_KG};

/// Running totals since the last profile configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyLedger {
    pub logged_water_ml: f64,
    pub logged_food_kcal: f64,
    pub burned_kcal: f64,
}

/// The record created on first contact (`/start`, `/set_profile`).
/// `profile` stays `None` until the wizard completes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRecord {
    pub profile: Option<UserProfile>,
    pub ledger: DailyLedger,
    /// City picked with `/set_city`, applied at the next wizard completion.
    pub preferred_city: Option<String>,
}

impl UserRecord {
    pub fn is_configured(&self) -> bool {
        self.profile.is_some()
    }

    pub fn weight_kg(&self) -> f64 {
        self.profile
            .as_ref()
            .map(|p| p.weight_kg)
            .unwrap_or(DEFAULT_WEIGHT_KG)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub record: Option<UserRecord>,
    pub conversation: ConversationState,
    /// Last time the conversation moved; `None` while idle.
    pub conversation_touched_at: Option<DateTime<Utc>>,
}

impl UserState {
    pub fn ensure_record(&mut self) -> &mut UserRecord {
        self.record.get_or_insert_with(UserRecord::default)
    }

    pub fn enter(&mut self, state: ConversationState) {
        self.conversation_touched_at = if state.is_idle() {
            None
        } else {
            Some(Utc::now())
        };
        self.conversation = state;
    }

    /// Marks the active wizard as in use without moving it.
    pub fn touch(&mut self) {
        if !self.conversation.is_idle() {
            self.conversation_touched_at = Some(Utc::now());
        }
    }

    /// Drops any in-progress wizard. Returns the state that was discarded.
    pub fn reset_conversation(&mut self) -> ConversationState {
        self.conversation_touched_at = None;
        std::mem::take(&mut self.conversation)
    }

    pub fn is_stale(&self, now: DateTime<Utc>, max_idle: chrono::Duration) -> bool {
        match self.conversation_touched_at {
            Some(touched) => !self.conversation.is_idle() && now - touched >= max_idle,
            None => false,
        }
    }
}
