//! Daily goal arithmetic. Every function here is pure and total: inputs are
//! validated and default-substituted before they reach this module.

use crate::models::{Gender, Goals};

pub const WATER_ML_PER_KG: f64 = 30.0;
pub const ACTIVITY_BLOCK_MINUTES: u32 = 30;
pub const ACTIVITY_WATER_BONUS_ML: f64 = 500.0;
pub const HOT_WEATHER_THRESHOLD_C: f64 = 25.0;
pub const HOT_WEATHER_BONUS_ML: f64 = 750.0;
pub const WORKOUT_WATER_PER_BLOCK_ML: u32 = 200;

/// Activity above this many minutes gets no further multiplier boost.
const MAX_COUNTED_ACTIVITY_MINUTES: u32 = 90;

/// `30 ml/kg` plus 500 ml per full 30 minutes of activity,
/// plus 750 ml when it is hotter than 25°C.
pub fn water_goal_ml(weight_kg: f64, activity_minutes: u32, temperature_c: f64) -> f64 {
    let base = weight_kg * WATER_ML_PER_KG;
    let activity_bonus = f64::from(activity_minutes / ACTIVITY_BLOCK_MINUTES) * ACTIVITY_WATER_BONUS_ML;
    let weather_bonus = if temperature_c > HOT_WEATHER_THRESHOLD_C {
        HOT_WEATHER_BONUS_ML
    } else {
        0.0
    };

    base + activity_bonus + weather_bonus
}

/// Basal Metabolic Rate, Mifflin-St Jeor (1990).
pub fn bmr_mifflin_st_jeor(weight_kg: f64, height_cm: f64, age_years: u32, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years) + offset
}

/// Activity minutes are capped at 90 and bucketed down to a multiple of 30.
pub fn activity_multiplier(activity_minutes: u32) -> f64 {
    let capped = activity_minutes.min(MAX_COUNTED_ACTIVITY_MINUTES);
    match capped / ACTIVITY_BLOCK_MINUTES * ACTIVITY_BLOCK_MINUTES {
        0 => 1.2,
        30 => 1.375,
        60 => 1.55,
        90 => 1.725,
        _ => 1.2,
    }
}

pub fn calorie_goal_kcal(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    activity_minutes: u32,
    gender: Gender,
) -> f64 {
    bmr_mifflin_st_jeor(weight_kg, height_cm, age_years, gender) * activity_multiplier(activity_minutes)
}

pub fn goals_for(
    weight_kg: f64,
    height_cm: f64,
    age_years: u32,
    activity_minutes: u32,
    gender: Gender,
    temperature_c: f64,
) -> Goals {
    Goals {
        water_ml: water_goal_ml(weight_kg, activity_minutes, temperature_c),
        calorie_kcal: calorie_goal_kcal(weight_kg, height_cm, age_years, activity_minutes, gender),
    }
}

/// `MET * kg * hours`, rounded half-to-even.
pub fn workout_calories(met: f64, weight_kg: f64, minutes: u32) -> f64 {
    (met * weight_kg * f64::from(minutes) / 60.0).round_ties_even()
}

/// Saturates instead of overflowing on absurd durations.
pub fn workout_extra_water_ml(minutes: u32) -> u32 {
    (minutes / ACTIVITY_BLOCK_MINUTES).saturating_mul(WORKOUT_WATER_PER_BLOCK_ML)
}

/// Share of `goal` reached, capped at 100. A non-positive goal counts as met.
pub fn percent_of(value: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 100.0;
    }
    (value / goal * 100.0).min(100.0)
}

pub fn remaining(value: f64, goal: f64) -> f64 {
    (goal - value).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn water_goal_adds_activity_and_heat_bonus() {
        assert_close(water_goal_ml(70.0, 45, 30.0), 3350.0);
    }

    #[test]
    fn water_goal_heat_threshold_is_exclusive() {
        assert_close(water_goal_ml(70.0, 0, 25.0), 2100.0);
        assert_close(water_goal_ml(70.0, 0, 25.1), 2850.0);
    }

    #[test]
    fn water_goal_counts_only_full_activity_blocks() {
        assert_close(water_goal_ml(60.0, 29, 20.0), 1800.0);
        assert_close(water_goal_ml(60.0, 30, 20.0), 2300.0);
        assert_close(water_goal_ml(60.0, 125, 20.0), 3800.0);
    }

    #[test]
    fn water_goal_zero_weight() {
        assert_close(water_goal_ml(0.0, 0, -5.0), 0.0);
    }

    #[test]
    fn bmr_gender_offsets() {
        assert_close(bmr_mifflin_st_jeor(70.0, 170.0, 30, Gender::Male), 1617.5);
        assert_close(bmr_mifflin_st_jeor(70.0, 170.0, 30, Gender::Female), 1451.5);
    }

    #[test]
    fn multiplier_buckets() {
        assert_eq!(activity_multiplier(0), 1.2);
        assert_eq!(activity_multiplier(29), 1.2);
        assert_eq!(activity_multiplier(30), 1.375);
        assert_eq!(activity_multiplier(59), 1.375);
        assert_eq!(activity_multiplier(60), 1.55);
        assert_eq!(activity_multiplier(90), 1.725);
        assert_eq!(activity_multiplier(600), 1.725);
    }

    #[test]
    fn calorie_goal_sedentary_male() {
        assert_close(calorie_goal_kcal(70.0, 170.0, 30, 0, Gender::Male), 1617.5 * 1.2);
    }

    #[test]
    fn calorie_goal_active_female() {
        assert_close(
            calorie_goal_kcal(60.0, 165.0, 25, 45, Gender::Female),
            (600.0 + 1031.25 - 125.0 - 161.0) * 1.375,
        );
    }

    #[test]
    fn workout_burn_running() {
        assert_close(workout_calories(9.0, 70.0, 30), 315.0);
        assert_eq!(workout_extra_water_ml(30), 200);
    }

    #[test]
    fn workout_burn_rounds_half_to_even() {
        // 5.0 * 1.0 * 30 / 60 = 2.5
        assert_close(workout_calories(5.0, 1.0, 30), 2.0);
        // 7.0 * 1.0 * 30 / 60 = 3.5
        assert_close(workout_calories(7.0, 1.0, 30), 4.0);
    }

    #[test]
    fn workout_water_counts_full_blocks() {
        assert_eq!(workout_extra_water_ml(0), 0);
        assert_eq!(workout_extra_water_ml(29), 0);
        assert_eq!(workout_extra_water_ml(95), 600);
    }

    #[test]
    fn huge_durations_do_not_overflow() {
        assert_eq!(workout_extra_water_ml(1_000_000_000), u32::MAX);
        assert_eq!(workout_extra_water_ml(u32::MAX), u32::MAX);
        assert!(workout_calories(9.0, 70.0, u32::MAX).is_finite());
    }

    #[test]
    fn percent_and_remaining_are_clamped() {
        assert_close(percent_of(800.0, 3350.0), 800.0 / 3350.0 * 100.0);
        assert_close(percent_of(5000.0, 3350.0), 100.0);
        assert_close(percent_of(10.0, 0.0), 100.0);
        assert_close(remaining(800.0, 3350.0), 2550.0);
        assert_close(remaining(5000.0, 3350.0), 0.0);
    }
}
