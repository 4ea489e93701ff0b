pub mod conversation;
pub mod profile;
pub mod user_state;

pub use conversation::{ConversationState, PendingFoodLog, WizardStep};
pub use profile::{Gender, Goals, UserProfile, DEFAULT_WEIGHT_KG};
pub use user_state::{DailyLedger, UserRecord, UserState};
