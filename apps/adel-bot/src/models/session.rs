use std::fmt;

/// One user's conversation inside one chat.
///
/// Keyed on both ids so two members of the same group chat never share
/// purchase state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId {
    pub chat_id: i64,
    pub user_id: i64,
}

impl SessionId {
    pub fn new(chat_id: i64, user_id: i64) -> Self {
        Self { chat_id, user_id }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.chat_id, self.user_id)
    }
}
