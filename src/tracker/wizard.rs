//! Pure transition function of the profile and food-grams wizards.
//! Side effects (weather lookup, committing the profile) live in the tracker.

use crate::models::{ConversationState, PendingFoodLog, WizardStep};

/// Profile fields collected by a finished wizard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub daily_activity_minutes: u32,
}

/// Intermediate answer taken by the profile wizard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accepted {
    Weight(f64),
    Height(f64),
    Age(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Value stored, wizard moves on to the next question.
    Advance {
        accepted: Accepted,
        next: ConversationState,
    },
    /// Last profile answer received; the caller finalizes.
    CompleteProfile(ProfileInput),
    CompleteFood { pending: PendingFoodLog, grams: f64 },
}

/// Feeds one free-text reply to the active wizard.
///
/// `Ok(None)` means no wizard is active. `Err(step)` means the reply was not a
/// valid answer for `step`; the caller keeps the current state untouched.
pub fn advance(state: &ConversationState, text: &str) -> Result<Option<Transition>, WizardStep> {
    let transition = match state {
        ConversationState::Idle => return Ok(None),
        ConversationState::AwaitingWeight => {
            let weight_kg = parse_measurement(text).ok_or(WizardStep::Weight)?;
            Transition::Advance {
                accepted: Accepted::Weight(weight_kg),
                next: ConversationState::AwaitingHeight { weight_kg },
            }
        }
        ConversationState::AwaitingHeight { weight_kg } => {
            let height_cm = parse_measurement(text).ok_or(WizardStep::Height)?;
            Transition::Advance {
                accepted: Accepted::Height(height_cm),
                next: ConversationState::AwaitingAge {
                    weight_kg: *weight_kg,
                    height_cm,
                },
            }
        }
        ConversationState::AwaitingAge {
            weight_kg,
            height_cm,
        } => {
            let age_years = parse_count(text).ok_or(WizardStep::Age)?;
            Transition::Advance {
                accepted: Accepted::Age(age_years),
                next: ConversationState::AwaitingActivity {
                    weight_kg: *weight_kg,
                    height_cm: *height_cm,
                    age_years,
                },
            }
        }
        ConversationState::AwaitingActivity {
            weight_kg,
            height_cm,
            age_years,
        } => {
            let daily_activity_minutes = parse_count(text).ok_or(WizardStep::Activity)?;
            Transition::CompleteProfile(ProfileInput {
                weight_kg: *weight_kg,
                height_cm: *height_cm,
                age_years: *age_years,
                daily_activity_minutes,
            })
        }
        ConversationState::AwaitingFoodGrams(pending) => {
            let grams = parse_quantity(text).ok_or(WizardStep::FoodGrams)?;
            Transition::CompleteFood {
                pending: pending.clone(),
                grams,
            }
        }
    };

    Ok(Some(transition))
}

/// Body measurement: finite and strictly positive.
fn parse_measurement(text: &str) -> Option<f64> {
    parse_float(text).filter(|v| *v > 0.0)
}

/// Food quantity: finite and not negative.
fn parse_quantity(text: &str) -> Option<f64> {
    parse_float(text).filter(|v| *v >= 0.0)
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_count(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_has_no_transition() {
        assert_eq!(advance(&ConversationState::Idle, "70"), Ok(None));
    }

    #[test]
    fn profile_steps_carry_values_forward() {
        let s = ConversationState::AwaitingWeight;
        let Ok(Some(Transition::Advance { accepted, next: s })) = advance(&s, "70") else {
            panic!("weight rejected");
        };
        assert_eq!(accepted, Accepted::Weight(70.0));
        assert_eq!(s, ConversationState::AwaitingHeight { weight_kg: 70.0 });

        let Ok(Some(Transition::Advance { next: s, .. })) = advance(&s, " 170.5 ") else {
            panic!("height rejected");
        };
        let Ok(Some(Transition::Advance { accepted, next: s })) = advance(&s, "30") else {
            panic!("age rejected");
        };
        assert_eq!(accepted, Accepted::Age(30));
        assert_eq!(
            s,
            ConversationState::AwaitingActivity {
                weight_kg: 70.0,
                height_cm: 170.5,
                age_years: 30
            }
        );

        assert_eq!(
            advance(&s, "45"),
            Ok(Some(Transition::CompleteProfile(ProfileInput {
                weight_kg: 70.0,
                height_cm: 170.5,
                age_years: 30,
                daily_activity_minutes: 45,
            })))
        );
    }

    #[test]
    fn invalid_weight_reports_step() {
        let s = ConversationState::AwaitingWeight;
        assert_eq!(advance(&s, "семьдесят"), Err(WizardStep::Weight));
        assert_eq!(advance(&s, ""), Err(WizardStep::Weight));
        assert_eq!(advance(&s, "-70"), Err(WizardStep::Weight));
        assert_eq!(advance(&s, "0"), Err(WizardStep::Weight));
        assert_eq!(advance(&s, "inf"), Err(WizardStep::Weight));
        assert_eq!(advance(&s, "NaN"), Err(WizardStep::Weight));
    }

    #[test]
    fn decimal_comma_is_accepted() {
        let s = ConversationState::AwaitingWeight;
        assert_eq!(
            advance(&s, "72,5"),
            Ok(Some(Transition::Advance {
                accepted: Accepted::Weight(72.5),
                next: ConversationState::AwaitingHeight { weight_kg: 72.5 },
            }))
        );
    }

    #[test]
    fn age_and_activity_need_whole_numbers() {
        let age = ConversationState::AwaitingAge {
            weight_kg: 70.0,
            height_cm: 170.0,
        };
        assert_eq!(advance(&age, "30.5"), Err(WizardStep::Age));
        assert_eq!(advance(&age, "-1"), Err(WizardStep::Age));

        let activity = ConversationState::AwaitingActivity {
            weight_kg: 70.0,
            height_cm: 170.0,
            age_years: 30,
        };
        assert_eq!(advance(&activity, "полчаса"), Err(WizardStep::Activity));
        assert!(matches!(
            advance(&activity, "0"),
            Ok(Some(Transition::CompleteProfile(_)))
        ));
    }

    #[test]
    fn food_grams() {
        let pending = PendingFoodLog {
            product: "банан".to_string(),
            label: "Банан".to_string(),
            cal_per_100: 89.0,
        };
        let s = ConversationState::AwaitingFoodGrams(pending.clone());
        assert_eq!(
            advance(&s, "150"),
            Ok(Some(Transition::CompleteFood {
                pending,
                grams: 150.0
            }))
        );
        assert_eq!(advance(&s, "много"), Err(WizardStep::FoodGrams));
        assert_eq!(advance(&s, "-5"), Err(WizardStep::FoodGrams));
    }
}
