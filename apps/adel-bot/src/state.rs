use crate::bot::controller::ConversationController;

#[derive(Clone)]
pub struct AppState {
    pub controller: ConversationController,
    /// Needed to recognise `/command@this_bot` in group chats.
    pub bot_username: String,
}
