use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Everything an inline button in this bot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Categories,
    PackageList,
    Balance,
    Help,
    Cancel,
    Category(i64),
    Buy(i64),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown callback payload `{0}`")]
pub struct UnknownPayload(pub String);

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::Categories => f.write_str("categories"),
            CallbackAction::PackageList => f.write_str("list"),
            CallbackAction::Balance => f.write_str("balance"),
            CallbackAction::Help => f.write_str("help"),
            CallbackAction::Cancel => f.write_str("cancel"),
            CallbackAction::Category(id) => write!(f, "cat_{}", id),
            CallbackAction::Buy(id) => write!(f, "buy_{}", id),
        }
    }
}

impl FromStr for CallbackAction {
    type Err = UnknownPayload;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let action = match data {
            "categories" => Some(CallbackAction::Categories),
            "list" => Some(CallbackAction::PackageList),
            "balance" => Some(CallbackAction::Balance),
            "help" => Some(CallbackAction::Help),
            "cancel" => Some(CallbackAction::Cancel),
            other => {
                if let Some(id) = other.strip_prefix("cat_") {
                    parse_id(id).map(CallbackAction::Category)
                } else if let Some(id) = other.strip_prefix("buy_") {
                    parse_id(id).map(CallbackAction::Buy)
                } else {
                    None
                }
            }
        };
        action.ok_or_else(|| UnknownPayload(data.to_string()))
    }
}

fn parse_id(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
