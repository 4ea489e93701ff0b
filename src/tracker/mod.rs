pub mod wizard;

use std::sync::Arc;

use teloxide::types::ChatId;
use thiserror::Error;

use crate::bot_state::BotState;
use crate::config::Config;
use crate::goals::{self, percent_of, remaining};
use crate::models::{
    ConversationState, DailyLedger, Gender, Goals, PendingFoodLog, UserProfile, UserRecord,
    UserState, WizardStep,
};
use crate::nutrition::NutritionLookup;
use crate::weather::WeatherLookup;
use wizard::{Accepted, ProfileInput, Transition};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackerError {
    #[error("user has no record yet")]
    NotRegistered,
    #[error("profile is not configured")]
    ProfileNotConfigured,
    #[error("invalid answer for {0:?}")]
    InvalidNumber(WizardStep),
}

#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub default_city: String,
    pub fallback_temperature_c: f64,
}

impl From<&Config> for TrackerSettings {
    fn from(config: &Config) -> Self {
        Self {
            default_city: config.default_city.clone(),
            fallback_temperature_c: config.fallback_temperature_c,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub city: String,
    pub temperature_c: f64,
    /// False when the fallback temperature was used.
    pub weather_available: bool,
    pub goals: Goals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodPrompt {
    pub label: String,
    pub cal_per_100: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodLogged {
    pub product: String,
    pub grams: f64,
    pub calories: f64,
    pub total_food_kcal: f64,
}

/// Answer to one wizard reply.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardReply {
    Accepted(Accepted),
    ProfileSaved(ProfileSummary),
    FoodLogged(FoodLogged),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterStatus {
    pub consumed_ml: f64,
    pub goal_ml: f64,
    pub remaining_ml: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterLogged {
    pub amount_ml: u32,
    pub status: WaterStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLogged {
    pub kind: String,
    pub minutes: u32,
    pub calories: f64,
    pub water_extra_ml: u32,
    pub total_burned_kcal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieStatus {
    pub consumed_kcal: f64,
    pub goal_kcal: f64,
    pub burned_kcal: f64,
    pub net_kcal: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressReport {
    pub water: WaterStatus,
    pub calories: CalorieStatus,
}

/// The conversation core: wizards plus the direct-action commands.
/// Every operation runs under the user's slot lock.
#[derive(Clone)]
pub struct Tracker {
    state: BotState,
    weather: Arc<dyn WeatherLookup>,
    nutrition: Arc<dyn NutritionLookup>,
    settings: TrackerSettings,
}

impl Tracker {
    pub fn new(
        state: BotState,
        weather: Arc<dyn WeatherLookup>,
        nutrition: Arc<dyn NutritionLookup>,
        settings: TrackerSettings,
    ) -> Self {
        Self {
            state,
            weather,
            nutrition,
            settings,
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// `/start`: creates the (empty) record if this is first contact.
    pub async fn register(&self, chat_id: ChatId) {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;
        if user.record.is_none() {
            log::info!("👋 New user {}", chat_id);
            user.ensure_record();
        }
    }

    /// `/set_profile`: (re)starts the profile wizard, replacing any active one.
    pub async fn begin_profile(&self, chat_id: ChatId) -> WizardStep {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;
        user.ensure_record();
        user.enter(ConversationState::AwaitingWeight);
        log::debug!("📝 Profile wizard started for {}", chat_id);
        WizardStep::Weight
    }

    /// `/cancel`: drops the active wizard. Returns the step that was abandoned.
    pub async fn cancel(&self, chat_id: ChatId) -> Option<WizardStep> {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;
        user.reset_conversation().step()
    }

    /// `/set_city`: remembered for the next profile completion.
    pub async fn set_city(&self, chat_id: ChatId, city: &str) -> Result<(), TrackerError> {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;
        let record = user.record.as_mut().ok_or(TrackerError::NotRegistered)?;
        record.preferred_city = Some(city.to_string());
        Ok(())
    }

    /// Feeds a plain-text reply to the user's active wizard.
    /// `Ok(None)` when no wizard is waiting for input.
    pub async fn handle_reply(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> Result<Option<WizardReply>, TrackerError> {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;

        let transition = match wizard::advance(&user.conversation, text) {
            Ok(Some(transition)) => transition,
            Ok(None) => return Ok(None),
            Err(step) => {
                user.touch();
                log::debug!("Rejected '{}' for {:?} from {}", text, step, chat_id);
                return Err(TrackerError::InvalidNumber(step));
            }
        };

        let reply = match transition {
            Transition::Advance { accepted, next } => {
                user.enter(next);
                WizardReply::Accepted(accepted)
            }
            Transition::CompleteProfile(input) => {
                WizardReply::ProfileSaved(self.finalize_profile(chat_id, &mut user, input).await)
            }
            Transition::CompleteFood { pending, grams } => {
                WizardReply::FoodLogged(apply_food(&mut user, pending, grams))
            }
        };

        Ok(Some(reply))
    }

    /// Weather lookup, goal computation and commit. The caller holds the
    /// user's lock, so nobody observes a half-written profile.
    async fn finalize_profile(
        &self,
        chat_id: ChatId,
        user: &mut UserState,
        input: ProfileInput,
    ) -> ProfileSummary {
        let record = user.ensure_record();
        let city = record
            .preferred_city
            .clone()
            .or_else(|| record.profile.as_ref().map(|p| p.city.clone()))
            .unwrap_or_else(|| self.settings.default_city.clone());

        let (temperature_c, weather_available) = match self.weather.current_temperature(&city).await {
            Ok(t) => (t, true),
            Err(e) => {
                log::warn!("⚠️ Weather for '{}' unavailable, using fallback: {}", city, e);
                (self.settings.fallback_temperature_c, false)
            }
        };

        let gender = Gender::default();
        let goals = goals::goals_for(
            input.weight_kg,
            input.height_cm,
            input.age_years,
            input.daily_activity_minutes,
            gender,
            temperature_c,
        );

        let record = user.ensure_record();
        record.profile = Some(UserProfile {
            weight_kg: input.weight_kg,
            height_cm: input.height_cm,
            age_years: input.age_years,
            daily_activity_minutes: input.daily_activity_minutes,
            city: city.clone(),
            gender,
            temperature_c,
            goals,
        });
        record.ledger = DailyLedger::default();
        user.enter(ConversationState::Idle);

        log::info!(
            "✅ Profile saved for {}: water {:.0} ml, calories {:.0} kcal",
            chat_id,
            goals.water_ml,
            goals.calorie_kcal
        );

        ProfileSummary {
            city,
            temperature_c,
            weather_available,
            goals,
        }
    }

    pub async fn log_water(&self, chat_id: ChatId, amount_ml: u32) -> Result<WaterLogged, TrackerError> {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;
        let (profile, ledger) = configured_mut(&mut user)?;

        ledger.logged_water_ml += f64::from(amount_ml);
        let status = water_status(ledger, profile.goals);
        log::debug!("💧 {} logged {} ml", chat_id, amount_ml);

        Ok(WaterLogged { amount_ml, status })
    }

    /// Looks the product up and opens the grams question.
    pub async fn log_food(&self, chat_id: ChatId, product: &str) -> Result<FoodPrompt, TrackerError> {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;
        if user.record.is_none() {
            return Err(TrackerError::NotRegistered);
        }

        let info = self.nutrition.food(product).await;
        user.enter(ConversationState::AwaitingFoodGrams(PendingFoodLog {
            product: product.to_string(),
            label: info.label.clone(),
            cal_per_100: info.cal_per_100,
        }));

        Ok(FoodPrompt {
            label: info.label,
            cal_per_100: info.cal_per_100,
        })
    }

    pub async fn log_workout(
        &self,
        chat_id: ChatId,
        kind: &str,
        minutes: u32,
    ) -> Result<WorkoutLogged, TrackerError> {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;
        let record = user.record.as_mut().ok_or(TrackerError::NotRegistered)?;

        let met = self.nutrition.workout_met(kind).await;
        let calories = goals::workout_calories(met, record.weight_kg(), minutes);
        let water_extra_ml = goals::workout_extra_water_ml(minutes);

        record.ledger.burned_kcal += calories;
        log::debug!("🏃 {} logged {} {} min ({} kcal)", chat_id, kind, minutes, calories);

        Ok(WorkoutLogged {
            kind: kind.to_string(),
            minutes,
            calories,
            water_extra_ml,
            total_burned_kcal: record.ledger.burned_kcal,
        })
    }

    pub async fn check_progress(&self, chat_id: ChatId) -> Result<ProgressReport, TrackerError> {
        let slot = self.state.slot(chat_id).await;
        let mut user = slot.lock().await;
        let (profile, ledger) = configured_mut(&mut user)?;
        let goal_kcal = profile.goals.calorie_kcal;

        Ok(ProgressReport {
            water: water_status(ledger, profile.goals),
            calories: CalorieStatus {
                consumed_kcal: ledger.logged_food_kcal,
                goal_kcal,
                burned_kcal: ledger.burned_kcal,
                net_kcal: ledger.logged_food_kcal - ledger.burned_kcal,
                percent: percent_of(ledger.logged_food_kcal, goal_kcal),
            },
        })
    }
}

fn configured_mut(user: &mut UserState) -> Result<(&UserProfile, &mut DailyLedger), TrackerError> {
    match user.record.as_mut() {
        Some(UserRecord {
            profile: Some(profile),
            ledger,
            ..
        }) => Ok((&*profile, ledger)),
        _ => Err(TrackerError::ProfileNotConfigured),
    }
}

fn water_status(ledger: &DailyLedger, goals: Goals) -> WaterStatus {
    WaterStatus {
        consumed_ml: ledger.logged_water_ml,
        goal_ml: goals.water_ml,
        remaining_ml: remaining(ledger.logged_water_ml, goals.water_ml),
        percent: percent_of(ledger.logged_water_ml, goals.water_ml),
    }
}

fn apply_food(user: &mut UserState, pending: PendingFoodLog, grams: f64) -> FoodLogged {
    let calories = grams / 100.0 * pending.cal_per_100;
    let record = user.ensure_record();
    record.ledger.logged_food_kcal += calories;
    let total_food_kcal = record.ledger.logged_food_kcal;
    user.enter(ConversationState::Idle);

    FoodLogged {
        product: pending.product,
        grams,
        calories,
        total_food_kcal,
    }
}
