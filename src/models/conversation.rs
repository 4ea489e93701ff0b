/// Food lookup result held between `/log_food` and the grams reply.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFoodLog {
    /// What the user typed, echoed back in the confirmation.
    pub product: String,
    pub label: String,
    pub cal_per_100: f64,
}

/// Per-user wizard position. Values collected so far travel inside the
/// variant, so nothing touches the stored profile before completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingWeight,
    AwaitingHeight {
        weight_kg: f64,
    },
    AwaitingAge {
        weight_kg: f64,
        height_cm: f64,
    },
    AwaitingActivity {
        weight_kg: f64,
        height_cm: f64,
        age_years: u32,
    },
    AwaitingFoodGrams(PendingFoodLog),
}

/// The question a wizard is currently asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Weight,
    Height,
    Age,
    Activity,
    FoodGrams,
}

impl ConversationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }

    pub fn step(&self) -> Option<WizardStep> {
        match self {
            ConversationState::Idle => None,
            ConversationState::AwaitingWeight => Some(WizardStep::Weight),
            ConversationState::AwaitingHeight { .. } => Some(WizardStep::Height),
            ConversationState::AwaitingAge { .. } => Some(WizardStep::Age),
            ConversationState::AwaitingActivity { .. } => Some(WizardStep::Activity),
            ConversationState::AwaitingFoodGrams(_) => Some(WizardStep::FoodGrams),
        }
    }
}
