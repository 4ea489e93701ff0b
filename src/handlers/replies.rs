//! MarkdownV2 texts sent back to the user. Static text goes through
//! `escape_markdown_v2` too, so only `bold` introduces markup.

use crate::handlers::actions::UsageError;
use crate::handlers::utils::{bold, capitalize, escape_markdown_v2, format_fixed, format_plain};
use crate::models::WizardStep;
use crate::nutrition::known_workouts;
use crate::tracker::wizard::Accepted;
use crate::tracker::{
    FoodLogged, FoodPrompt, ProfileSummary, ProgressReport, TrackerError, WaterLogged, WizardReply,
    WorkoutLogged,
};

const NEED_PROFILE: &str = "❌ Сначала настройте профиль: /set_profile";

pub fn start_text() -> String {
    format!(
        "{}\n\n{}",
        bold("💧🤖 Добро пожаловать в трекер воды и калорий!"),
        escape_markdown_v2(
            "Доступные команды:\n\
            /set_profile - настроить профиль\n\
            /log_water <мл> - выпить воду\n\
            /log_food <продукт> - записать еду\n\
            /log_workout <тип> <мин> - тренировка\n\
            /check_progress - прогресс\n\
            /set_city <город> - город для учёта погоды\n\
            /cancel - отменить ввод\n\
            /help - помощь"
        )
    )
}

pub fn help_text() -> String {
    let workouts = known_workouts().collect::<Vec<_>>().join(", ");
    format!(
        "{}\n\n{}",
        bold("📋 Помощь:"),
        escape_markdown_v2(&format!(
            "• /set_profile - вес, рост, возраст, активность\n\
            • /log_water 500 - выпить 500 мл воды\n\
            • /log_food банан - съесть банан\n\
            • /log_workout бег 30 - пробежать 30 мин\n\
            • /check_progress - текущий прогресс\n\
            • /set_city Moscow - город для учёта жары\n\
            • /cancel - прервать ввод\n\n\
            🏋️ Тренировки: {}",
            workouts
        ))
    )
}

pub fn wizard_prompt(step: WizardStep) -> String {
    let text = match step {
        WizardStep::Weight => "⚖️ Введите ваш вес (в кг):",
        WizardStep::Height => "📏 Введите рост (в см):",
        WizardStep::Age => "🎂 Введите возраст:",
        WizardStep::Activity => "🏃‍♂️ Минут активности в день:",
        WizardStep::FoodGrams => "📊 Сколько грамм вы съели?",
    };
    escape_markdown_v2(text)
}

pub fn invalid_answer(step: WizardStep) -> String {
    match step {
        WizardStep::FoodGrams => escape_markdown_v2("❌ Введите число грамм!"),
        _ => escape_markdown_v2("❌ Введите число! Попробуйте снова:"),
    }
}

pub fn wizard_reply(reply: &WizardReply) -> String {
    match reply {
        WizardReply::Accepted(Accepted::Weight(weight)) => format!(
            "✅ Вес: {} кг\n{}",
            format_plain(*weight),
            wizard_prompt(WizardStep::Height)
        ),
        WizardReply::Accepted(Accepted::Height(height)) => format!(
            "✅ Рост: {} см\n{}",
            format_plain(*height),
            wizard_prompt(WizardStep::Age)
        ),
        WizardReply::Accepted(Accepted::Age(age)) => format!(
            "✅ Возраст: {} лет\n{}",
            age,
            wizard_prompt(WizardStep::Activity)
        ),
        WizardReply::ProfileSaved(summary) => profile_saved(summary),
        WizardReply::FoodLogged(logged) => food_logged(logged),
    }
}

fn profile_saved(summary: &ProfileSummary) -> String {
    let mut text = format!(
        "{}\n\n💧 Норма воды: {} мл\n🔥 Норма калорий: {} ккал\n🌡️ Температура \\({}\\): {}°C",
        bold("✅ Профиль сохранен!"),
        format_fixed(summary.goals.water_ml, 0),
        format_fixed(summary.goals.calorie_kcal, 0),
        escape_markdown_v2(&summary.city),
        format_plain(summary.temperature_c),
    );
    if !summary.weather_available {
        text.push_str(&escape_markdown_v2(
            "\nℹ️ Погода недоступна, использована температура по умолчанию.",
        ));
    }
    text
}

pub fn food_prompt(prompt: &FoodPrompt) -> String {
    format!(
        "🍌 {} — {} ккал/100г\n{}",
        escape_markdown_v2(&prompt.label),
        format_plain(prompt.cal_per_100),
        wizard_prompt(WizardStep::FoodGrams)
    )
}

fn food_logged(logged: &FoodLogged) -> String {
    format!(
        "✅ Записано: {} ккал от {}г {}\n📈 Всего съедено: {} ккал",
        format_fixed(logged.calories, 1),
        format_plain(logged.grams),
        escape_markdown_v2(&logged.product),
        format_fixed(logged.total_food_kcal, 0)
    )
}

pub fn water_logged(logged: &WaterLogged) -> String {
    let status = &logged.status;
    format!(
        "💧 Записано {} мл\n📊 Выпито: {} мл / {} мл\n💦 Осталось: {} мл \\({}%\\)",
        logged.amount_ml,
        format_fixed(status.consumed_ml, 0),
        format_fixed(status.goal_ml, 0),
        format_fixed(status.remaining_ml, 0),
        format_fixed(status.percent, 0)
    )
}

pub fn workout_logged(logged: &WorkoutLogged) -> String {
    format!(
        "🏃‍♂️ {} {} мин\n🔥 Сожжено: {} ккал\n💧 Выпейте дополнительно {} мл воды\\!\n📊 Всего сожжено: {} ккал",
        escape_markdown_v2(&capitalize(&logged.kind)),
        logged.minutes,
        format_fixed(logged.calories, 0),
        logged.water_extra_ml,
        format_fixed(logged.total_burned_kcal, 0)
    )
}

pub fn progress(report: &ProgressReport) -> String {
    let water = &report.water;
    let calories = &report.calories;
    format!(
        "{}\n\n\
        💧 {}\n\
        • Выпито: {}/{} мл\n\
        • Осталось: {} мл\n\
        • Прогресс: {}%\n\n\
        🔥 {}\n\
        • Потреблено: {}/{} ккал\n\
        • Сожжено: {} ккал\n\
        • Баланс: {} ккал \\({}%\\)",
        bold("📊 Прогресс за день:"),
        bold("Вода:"),
        format_fixed(water.consumed_ml, 0),
        format_fixed(water.goal_ml, 0),
        format_fixed(water.remaining_ml, 0),
        format_fixed(water.percent, 0),
        bold("Калории:"),
        format_fixed(calories.consumed_kcal, 0),
        format_fixed(calories.goal_kcal, 0),
        format_fixed(calories.burned_kcal, 0),
        format_fixed(calories.net_kcal, 0),
        format_fixed(calories.percent, 0)
    )
}

pub fn tracker_error(error: TrackerError) -> String {
    match error {
        TrackerError::NotRegistered | TrackerError::ProfileNotConfigured => {
            escape_markdown_v2(NEED_PROFILE)
        }
        TrackerError::InvalidNumber(step) => invalid_answer(step),
    }
}

pub fn usage_error(error: UsageError) -> String {
    let text = match error {
        UsageError::LogWater => "❌ Формат: /log_water 500",
        UsageError::LogFood => "❌ Формат: /log_food банан",
        UsageError::LogWorkout => "❌ Формат: /log_workout бег 30",
        UsageError::SetCity => "❌ Формат: /set_city Moscow",
    };
    escape_markdown_v2(text)
}

pub fn cancelled(step: Option<WizardStep>) -> String {
    match step {
        Some(_) => escape_markdown_v2("🚫 Ввод отменён. Сохранённый профиль не изменился."),
        None => escape_markdown_v2("Нечего отменять."),
    }
}

pub fn city_saved(city: &str) -> String {
    format!(
        "🏙️ Город {} сохранён\\. {}",
        bold(city),
        escape_markdown_v2("Норма воды пересчитается после /set_profile.")
    )
}

pub fn wizard_expired(step: Option<WizardStep>) -> String {
    let retry = match step {
        Some(WizardStep::FoodGrams) => "/log_food",
        _ => "/set_profile",
    };
    escape_markdown_v2(&format!(
        "⌛ Ввод прерван из-за долгого ожидания. Начните заново: {}",
        retry
    ))
}

pub fn idle_hint() -> String {
    escape_markdown_v2("👋 Используйте меню или /help, чтобы увидеть команды.")
}

pub fn unknown_command() -> String {
    escape_markdown_v2("🤔 Не понял команду. Список команд: /help")
}
