use teloxide::types::{KeyboardButton, KeyboardMarkup, ReplyMarkup};

use crate::handlers::actions::{MENU_HELP, MENU_PROFILE, MENU_PROGRESS};

/// Escapes every MarkdownV2 special character.
pub fn escape_markdown_v2(text: &str) -> String {
    let specials = ['_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!'];
    let mut out = String::with_capacity(text.len() * 2);

    for ch in text.chars() {
        if specials.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

pub fn bold(text: &str) -> String {
    format!("*{}*", escape_markdown_v2(text))
}

/// Fixed number of decimals, already escaped.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    escape_markdown_v2(&format!("{:.*}", decimals, value))
}

/// Shortest form, so `70.0` prints as `70`. Already escaped.
pub fn format_plain(value: f64) -> String {
    escape_markdown_v2(&value.to_string())
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

pub fn main_menu_keyboard() -> ReplyMarkup {
    ReplyMarkup::Keyboard(
        KeyboardMarkup::new(vec![
            vec![KeyboardButton::new(MENU_PROGRESS)],
            vec![KeyboardButton::new(MENU_PROFILE), KeyboardButton::new(MENU_HELP)],
        ])
        .resize_keyboard(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markdown_specials() {
        assert_eq!(escape_markdown_v2("/log_water 500!"), "/log\\_water 500\\!");
        assert_eq!(escape_markdown_v2("Молоко 2.5%"), "Молоко 2\\.5%");
    }

    #[test]
    fn numbers_are_escaped() {
        assert_eq!(format_fixed(133.5, 1), "133\\.5");
        assert_eq!(format_fixed(2046.6, 0), "2047");
        assert_eq!(format_fixed(-215.0, 0), "\\-215");
        assert_eq!(format_plain(70.0), "70");
        assert_eq!(format_plain(72.5), "72\\.5");
    }

    #[test]
    fn capitalize_handles_cyrillic() {
        assert_eq!(capitalize("бег"), "Бег");
        assert_eq!(capitalize(""), "");
    }
}
