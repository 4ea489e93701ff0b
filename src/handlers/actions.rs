//! Turns raw teloxide commands into typed actions. Argument validation
//! happens here so the tracker only sees well-formed values.

use thiserror::Error;

use crate::Command;

pub const MENU_PROGRESS: &str = "📊 Прогресс";
pub const MENU_PROFILE: &str = "⚙️ Профиль";
pub const MENU_HELP: &str = "ℹ️ Помощь";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Start,
    Help,
    SetProfile,
    Cancel,
    SetCity(String),
    LogWater { amount_ml: u32 },
    LogFood { product: String },
    LogWorkout { kind: String, minutes: u32 },
    CheckProgress,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    #[error("expected /log_water <ml>")]
    LogWater,
    #[error("expected /log_food <product>")]
    LogFood,
    #[error("expected /log_workout <type> <minutes>")]
    LogWorkout,
    #[error("expected /set_city <city>")]
    SetCity,
}

impl TryFrom<Command> for Action {
    type Error = UsageError;

    fn try_from(cmd: Command) -> Result<Self, Self::Error> {
        Ok(match cmd {
            Command::Start => Action::Start,
            Command::Help => Action::Help,
            Command::SetProfile => Action::SetProfile,
            Command::Cancel => Action::Cancel,
            Command::CheckProgress => Action::CheckProgress,
            Command::LogWater(args) => Action::LogWater {
                amount_ml: parse_water(&args)?,
            },
            Command::LogFood(args) => Action::LogFood {
                product: non_empty(&args).ok_or(UsageError::LogFood)?,
            },
            Command::LogWorkout(args) => {
                let (kind, minutes) = parse_workout(&args)?;
                Action::LogWorkout { kind, minutes }
            }
            Command::SetCity(args) => Action::SetCity(non_empty(&args).ok_or(UsageError::SetCity)?),
        })
    }
}

impl Action {
    /// Reply-keyboard buttons are shortcuts for argument-less commands.
    pub fn from_menu_button(text: &str) -> Option<Self> {
        match text {
            MENU_PROGRESS => Some(Action::CheckProgress),
            MENU_PROFILE => Some(Action::SetProfile),
            MENU_HELP => Some(Action::Help),
            _ => None,
        }
    }
}

/// Longest workout accepted in one command: a full day.
const MAX_WORKOUT_MINUTES: u32 = 24 * 60;

fn parse_water(args: &str) -> Result<u32, UsageError> {
    args.split_whitespace()
        .next()
        .and_then(leading_count)
        .ok_or(UsageError::LogWater)
}

fn parse_workout(args: &str) -> Result<(String, u32), UsageError> {
    let mut parts = args.split_whitespace();
    let kind = parts.next().ok_or(UsageError::LogWorkout)?;
    let minutes = parts
        .next()
        .and_then(leading_count)
        .filter(|m| *m <= MAX_WORKOUT_MINUTES)
        .ok_or(UsageError::LogWorkout)?;
    Ok((kind.to_string(), minutes))
}

/// Digits at the start of `token`, so `500ml` and `30мин` read as counts.
/// A fractional part (`0.5`, `1,5`) is rejected rather than truncated.
fn leading_count(token: &str) -> Option<u32> {
    let end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, rest) = token.split_at(end);
    if digits.is_empty() || rest.starts_with(['.', ',']) {
        return None;
    }
    digits.parse().ok()
}

fn non_empty(args: &str) -> Option<String> {
    let trimmed = args.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
