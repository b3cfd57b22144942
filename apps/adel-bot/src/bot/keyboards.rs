use crate::bot::callback_data::CallbackAction;
use crate::bot::messages;
use crate::models::{Category, Product};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

fn button(label: impl Into<String>, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, action.to_string())
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button(messages::BUTTON_CATEGORIES, CallbackAction::Categories)],
        vec![button(messages::BUTTON_PACKAGES, CallbackAction::PackageList)],
        vec![button(messages::BUTTON_BALANCE, CallbackAction::Balance)],
        vec![button(messages::BUTTON_HELP, CallbackAction::Help)],
    ])
}

pub fn categories_keyboard(categories: &[Category]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(categories.iter().map(|cat| {
        vec![button(
            format!("{} ({})", cat.title, cat.product_count),
            CallbackAction::Category(cat.id),
        )]
    }))
}

pub fn products_keyboard(products: &[Product]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(products.iter().map(|p| {
        vec![button(
            format!("{} 💵 {}$", p.title, p.unit_price),
            CallbackAction::Buy(p.id),
        )]
    }))
}

pub fn cancel_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button(messages::BUTTON_CANCEL, CallbackAction::Cancel)]])
}

#[cfg(test)]
pub(crate) fn rows(markup: &InlineKeyboardMarkup) -> Vec<Vec<(String, String)>> {
    use teloxide::types::InlineKeyboardButtonKind;

    markup
        .inline_keyboard
        .iter()
        .map(|row| {
            row.iter()
                .map(|b| {
                    let data = match &b.kind {
                        InlineKeyboardButtonKind::CallbackData(d) => d.clone(),
                        other => format!("{:?}", other),
                    };
                    (b.text.clone(), data)
                })
                .collect()
        })
        .collect()
}
