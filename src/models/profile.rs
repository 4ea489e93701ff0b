/// Used for workout burn when the user never completed the profile wizard.
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Daily targets derived once per profile configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goals {
    pub water_ml: f64,
    pub calorie_kcal: f64,
}

/// Fully populated profile. Only exists once the wizard has completed,
/// so every field here is already validated and default-substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub daily_activity_minutes: u32,
    pub city: String,
    pub gender: Gender,
    pub temperature_c: f64,
    pub goals: Goals,
}
