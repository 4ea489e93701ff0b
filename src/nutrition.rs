use async_trait::async_trait;

pub const UNKNOWN_FOOD_LABEL: &str = "Неизвестный продукт";
pub const UNKNOWN_FOOD_CAL_PER_100: f64 = 100.0;
pub const DEFAULT_MET: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FoodInfo {
    pub label: String,
    pub cal_per_100: f64,
}

/// Food and workout energy estimates. Never fails: unknown input gets a default.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn food(&self, name: &str) -> FoodInfo;

    async fn workout_met(&self, kind: &str) -> f64;
}

/// (keyword, label, kcal per 100 g). Matched in order as a substring of the
/// lowercased product name, so "банановый смузи" still resolves to банан.
const FOODS: &[(&str, &str, f64)] = &[
    ("банан", "Банан", 89.0),
    ("яблоко", "Яблоко", 52.0),
    ("курица", "Куриная грудка", 165.0),
    ("рис", "Рис вареный", 130.0),
    ("овсянка", "Овсянка на воде", 68.0),
    ("хлеб", "Хлеб белый", 265.0),
    ("молоко", "Молоко 2.5%", 42.0),
];

const WORKOUT_METS: &[(&str, f64)] = &[
    ("бег", 9.0),
    ("ходьба", 3.8),
    ("велосипед", 8.0),
    ("силовая", 6.0),
    ("плавание", 7.0),
    ("йога", 3.0),
];

/// Workout types with a known MET value, for the help text.
pub fn known_workouts() -> impl Iterator<Item = &'static str> {
    WORKOUT_METS.iter().map(|(name, _)| *name)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticNutritionTable;

#[async_trait]
impl NutritionLookup for StaticNutritionTable {
    async fn food(&self, name: &str) -> FoodInfo {
        let lowered = name.to_lowercase();
        FOODS
            .iter()
            .find(|(keyword, _, _)| lowered.contains(*keyword))
            .map(|(_, label, cal)| FoodInfo {
                label: label.to_string(),
                cal_per_100: *cal,
            })
            .unwrap_or_else(|| {
                log::debug!("No nutrition entry for '{}', using default", name);
                FoodInfo {
                    label: UNKNOWN_FOOD_LABEL.to_string(),
                    cal_per_100: UNKNOWN_FOOD_CAL_PER_100,
                }
            })
    }

    async fn workout_met(&self, kind: &str) -> f64 {
        let lowered = kind.to_lowercase();
        WORKOUT_METS
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, met)| *met)
            .unwrap_or(DEFAULT_MET)
    }
}
