use crate::bot::callback_data::CallbackAction;
use crate::bot::{keyboards, messages};
use crate::error::StoreError;
use crate::models::SessionId;
use crate::services::catalog_client::{category_title_contains, CatalogClient};
use crate::services::{AccountClient, OrderClient, PendingPurchaseRegistry};
use std::sync::Arc;
use teloxide::types::InlineKeyboardMarkup;
use tracing::{debug, error, warn};

/// Transport-independent view of an incoming update.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Menu,
    Action(CallbackAction),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

#[derive(Clone)]
pub struct ConversationController {
    catalog: CatalogClient,
    account: AccountClient,
    orders: OrderClient,
    pending: Arc<PendingPurchaseRegistry>,
    package_filter: String,
}

impl ConversationController {
    pub fn new(
        catalog: CatalogClient,
        account: AccountClient,
        orders: OrderClient,
        pending: Arc<PendingPurchaseRegistry>,
        package_filter: String,
    ) -> Self {
        Self {
            catalog,
            account,
            orders,
            pending,
            package_filter,
        }
    }

    /// `None` means the event needs no answer.
    pub async fn handle(&self, session: SessionId, event: Event) -> Option<Reply> {
        match event {
            Event::Menu => Some(Reply::with_keyboard(messages::WELCOME, keyboards::main_menu())),
            Event::Action(action) => Some(self.on_action(session, action).await),
            Event::Text(text) => self.on_text(session, &text).await,
        }
    }

    async fn on_action(&self, session: SessionId, action: CallbackAction) -> Reply {
        match action {
            CallbackAction::Categories => self.categories().await,
            CallbackAction::PackageList => self.packages().await,
            CallbackAction::Category(id) => self.products(id).await,
            CallbackAction::Buy(product_id) => {
                self.pending.begin(session, product_id);
                Reply::with_keyboard(messages::ASK_PLAYER_ID, keyboards::cancel_keyboard())
            }
            CallbackAction::Cancel => {
                if self.pending.cancel(session) {
                    Reply::with_keyboard(messages::CANCELLED, keyboards::main_menu())
                } else {
                    Reply::text(messages::NOTHING_TO_CANCEL)
                }
            }
            CallbackAction::Balance => match self.account.get_balance().await {
                Ok(balance) => Reply::text(messages::balance(&balance)),
                Err(e) => {
                    error!("Balance Error: {}", e);
                    Reply::text(messages::BALANCE_FAILED)
                }
            },
            CallbackAction::Help => Reply::text(messages::HELP),
        }
    }

    async fn categories(&self) -> Reply {
        match self.catalog.list_categories().await {
            Ok(cats) => Reply::with_keyboard(
                messages::CATEGORIES_HEADER,
                keyboards::categories_keyboard(&cats),
            ),
            Err(StoreError::EmptyResult) => Reply::text(messages::NO_CATEGORIES),
            Err(e) => {
                error!("Category Error: {}", e);
                Reply::text(messages::CATEGORIES_FAILED)
            }
        }
    }

    async fn products(&self, category_id: i64) -> Reply {
        match self.catalog.list_products_in_category(category_id).await {
            Ok(products) => Reply::with_keyboard(
                messages::PRODUCTS_HEADER,
                keyboards::products_keyboard(&products),
            ),
            Err(StoreError::EmptyResult) => Reply::text(messages::NO_PRODUCTS),
            Err(e) => {
                error!(category_id, "Product Error: {}", e);
                Reply::text(messages::PRODUCTS_FAILED)
            }
        }
    }

    async fn packages(&self) -> Reply {
        let filter = category_title_contains(&self.package_filter);
        match self.catalog.list_all_products(filter).await {
            Ok(products) => Reply::with_keyboard(
                messages::PACKAGES_HEADER,
                keyboards::products_keyboard(&products),
            ),
            Err(StoreError::EmptyResult) => Reply::text(messages::NO_PACKAGES),
            Err(e) => {
                error!("Package list Error: {}", e);
                Reply::text(messages::PRODUCTS_FAILED)
            }
        }
    }

    async fn on_text(&self, session: SessionId, text: &str) -> Option<Reply> {
        let Some(resolution) = self.pending.resolve(session, text) else {
            debug!(%session, "text outside any purchase flow, ignoring");
            return None;
        };

        let reply = match self
            .orders
            .purchase(resolution.product_id, &resolution.player_id)
            .await
        {
            Ok(outcome) if outcome.accepted => Reply::text(messages::purchase_accepted(&outcome)),
            Ok(outcome) => {
                warn!(
                    %session,
                    product_id = resolution.product_id,
                    upstream_message = ?outcome.status_message,
                    "purchase rejected by reseller"
                );
                Reply::text(messages::PURCHASE_REJECTED)
            }
            Err(StoreError::Validation(reason)) => {
                debug!(%session, "re-prompting for player id: {}", reason);
                if !self.pending.reinstate(session, &resolution) {
                    debug!(%session, "selection lapsed or was replaced during re-prompt");
                }
                Reply::with_keyboard(messages::EMPTY_PLAYER_ID, keyboards::cancel_keyboard())
            }
            Err(e) => {
                error!(%session, product_id = resolution.product_id, "Purchase Error: {}", e);
                Reply::text(messages::PURCHASE_FAILED)
            }
        };
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::keyboards::rows;
    use crate::config::PurchaseRoute;
    use crate::testing::{Canned, FakeTransport};
    use serde_json::json;

    const ME: SessionId = SessionId { chat_id: 10, user_id: 10 };
    const OTHER: SessionId = SessionId { chat_id: 20, user_id: 20 };

    struct Harness {
        fake: Arc<FakeTransport>,
        pending: Arc<PendingPurchaseRegistry>,
        controller: ConversationController,
    }

    fn harness() -> Harness {
        harness_with_ttl(None)
    }

    fn harness_with_ttl(ttl: Option<std::time::Duration>) -> Harness {
        let fake = FakeTransport::new();
        let pending = Arc::new(PendingPurchaseRegistry::new(ttl));
        let controller = ConversationController::new(
            CatalogClient::new(fake.clone()),
            AccountClient::new(fake.clone(), "AFN".into()),
            OrderClient::new(fake.clone(), PurchaseRoute::Offers),
            pending.clone(),
            "uc".into(),
        );
        Harness {
            fake,
            pending,
            controller,
        }
    }

    fn offer(id: i64) -> String {
        format!("/v1/topup/pubgMobile/offers/{}/purchase", id)
    }

    impl Harness {
        async fn send(&self, session: SessionId, event: Event) -> Option<Reply> {
            self.controller.handle(session, event).await
        }

        async fn tap(&self, session: SessionId, payload: &str) -> Reply {
            let action = payload.parse::<CallbackAction>().unwrap();
            self.send(session, Event::Action(action)).await.unwrap()
        }

        async fn say(&self, session: SessionId, text: &str) -> Option<Reply> {
            self.send(session, Event::Text(text.into())).await
        }
    }

    #[tokio::test]
    async fn menu_shows_root_buttons() {
        let h = harness();
        let reply = h.send(ME, Event::Menu).await.unwrap();
        assert_eq!(reply.text, messages::WELCOME);
        assert_eq!(rows(reply.keyboard.as_ref().unwrap()).len(), 4);
        assert!(h.fake.calls().is_empty());
    }

    #[tokio::test]
    async fn categories_render_one_button_each() {
        let h = harness();
        h.fake.respond(
            "/v1/category",
            json!({ "success": true, "categories": [{ "id": 1, "title": "UC", "product_count": 5 }] }),
        );

        let reply = h.tap(ME, "categories").await;
        assert_eq!(reply.text, messages::CATEGORIES_HEADER);
        assert_eq!(
            rows(reply.keyboard.as_ref().unwrap()),
            vec![vec![("UC (5)".to_string(), "cat_1".to_string())]]
        );
    }

    #[tokio::test]
    async fn empty_categories_differ_from_timeouts() {
        let h = harness();
        h.fake.respond("/v1/category", json!({ "success": true, "categories": [] }));
        let empty = h.tap(ME, "categories").await;
        assert_eq!(empty.text, messages::NO_CATEGORIES);
        assert!(empty.keyboard.is_none());

        h.fake.fail("/v1/category", Canned::Timeout);
        let timeout = h.tap(ME, "categories").await;
        assert_eq!(timeout.text, messages::CATEGORIES_FAILED);
        assert_ne!(empty.text, timeout.text);
    }

    #[tokio::test]
    async fn category_products_become_buy_buttons() {
        let h = harness();
        h.fake.respond(
            "/v1/category/1",
            json!({ "success": true, "products": [{ "id": 42, "title": "60 UC", "unit_price": 0.99 }] }),
        );

        let reply = h.tap(ME, "cat_1").await;
        assert_eq!(
            rows(reply.keyboard.as_ref().unwrap()),
            vec![vec![("60 UC 💵 0.99$".to_string(), "buy_42".to_string())]]
        );

        h.fake.respond("/v1/category/2", json!({ "success": true, "products": [] }));
        assert_eq!(h.tap(ME, "cat_2").await.text, messages::NO_PRODUCTS);

        h.fake.fail("/v1/category/3", Canned::Status(500));
        assert_eq!(h.tap(ME, "cat_3").await.text, messages::PRODUCTS_FAILED);
    }

    #[tokio::test]
    async fn package_list_filters_by_category_title() {
        let h = harness();
        h.fake.respond(
            "/v1/products",
            json!({
                "success": true,
                "products": [
                    { "id": 1, "name": "60 UC", "price": 1, "category_title": "PUBG UC" },
                    { "id": 2, "name": "Steam", "price": 10, "category_title": "Gift cards" }
                ]
            }),
        );

        let reply = h.tap(ME, "list").await;
        assert_eq!(reply.text, messages::PACKAGES_HEADER);
        assert_eq!(
            rows(reply.keyboard.as_ref().unwrap()),
            vec![vec![("60 UC 💵 1$".to_string(), "buy_1".to_string())]]
        );

        h.fake.respond("/v1/products", json!({ "success": true, "products": [] }));
        assert_eq!(h.tap(ME, "list").await.text, messages::NO_PACKAGES);
    }

    #[tokio::test]
    async fn buy_then_player_id_purchases_exactly_once() {
        let h = harness();
        h.fake.respond(&offer(42), json!({ "success": true, "message": "completed" }));

        let prompt = h.tap(ME, "buy_42").await;
        assert_eq!(prompt.text, messages::ASK_PLAYER_ID);
        assert_eq!(
            rows(prompt.keyboard.as_ref().unwrap()),
            vec![vec![(messages::BUTTON_CANCEL.to_string(), "cancel".to_string())]]
        );
        assert!(h.fake.calls().is_empty());

        let reply = h.say(ME, "500012345").await.unwrap();
        assert!(reply.text.starts_with("✅"));
        assert!(reply.text.contains("completed"));

        let calls = h.fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, offer(42));
        assert_eq!(calls[0].body, Some(json!({ "player_id": "500012345" })));

        assert!(h.say(ME, "500012345").await.is_none());
        assert_eq!(h.fake.calls().len(), 1);
    }

    #[tokio::test]
    async fn rejected_purchase_clears_pending_state() {
        let h = harness();
        h.fake.respond(&offer(42), json!({ "success": false }));

        h.tap(ME, "buy_42").await;
        let reply = h.say(ME, "123").await.unwrap();
        assert_eq!(reply.text, messages::PURCHASE_REJECTED);
        assert!(!h.pending.is_pending(ME));
    }

    #[tokio::test]
    async fn transport_failure_gets_generic_apology() {
        let h = harness();
        h.fake.fail(&offer(42), Canned::Timeout);

        h.tap(ME, "buy_42").await;
        let reply = h.say(ME, "123").await.unwrap();
        assert_eq!(reply.text, messages::PURCHASE_FAILED);
        assert!(!h.pending.is_pending(ME));
        assert_eq!(h.fake.calls_to(&offer(42)).len(), 1);
    }

    #[tokio::test]
    async fn blank_player_id_reprompts_and_keeps_selection() {
        let h = harness();
        h.fake.respond(&offer(42), json!({ "success": true }));

        h.tap(ME, "buy_42").await;
        let reply = h.say(ME, "   ").await.unwrap();
        assert_eq!(reply.text, messages::EMPTY_PLAYER_ID);
        assert!(h.pending.is_pending(ME));
        assert!(h.fake.calls().is_empty());

        h.say(ME, "777").await.unwrap();
        assert_eq!(h.fake.calls_to(&offer(42)).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_replies_do_not_extend_the_selection() {
        use std::time::Duration;

        let h = harness_with_ttl(Some(Duration::from_secs(60)));
        h.fake.respond(&offer(42), json!({ "success": true }));

        h.tap(ME, "buy_42").await;
        tokio::time::advance(Duration::from_secs(40)).await;
        let reply = h.say(ME, " ").await.unwrap();
        assert_eq!(reply.text, messages::EMPTY_PLAYER_ID);

        tokio::time::advance(Duration::from_secs(25)).await;
        assert!(h.say(ME, "777").await.is_none());
        assert!(h.fake.calls().is_empty());
    }

    #[tokio::test]
    async fn unrelated_text_gets_no_reply() {
        let h = harness();
        assert!(h.say(ME, "hello").await.is_none());
        assert!(h.fake.calls().is_empty());
    }

    #[tokio::test]
    async fn concurrent_flows_stay_in_their_sessions() {
        let h = harness();
        h.fake.respond(&offer(1), json!({ "success": true }));
        h.fake.respond(&offer(2), json!({ "success": true }));

        h.tap(ME, "buy_1").await;
        h.tap(OTHER, "buy_2").await;

        h.say(OTHER, "other-id").await.unwrap();
        h.say(ME, "my-id").await.unwrap();

        assert_eq!(h.fake.calls_to(&offer(2))[0].body, Some(json!({ "player_id": "other-id" })));
        assert_eq!(h.fake.calls_to(&offer(1))[0].body, Some(json!({ "player_id": "my-id" })));
    }

    #[tokio::test]
    async fn reselecting_replaces_the_product() {
        let h = harness();
        h.fake.respond(&offer(2), json!({ "success": true }));

        h.tap(ME, "buy_1").await;
        h.tap(ME, "buy_2").await;
        h.say(ME, "id").await.unwrap();

        assert!(h.fake.calls_to(&offer(1)).is_empty());
        assert_eq!(h.fake.calls_to(&offer(2)).len(), 1);
    }

    #[tokio::test]
    async fn cancel_drops_the_pending_purchase() {
        let h = harness();
        h.tap(ME, "buy_42").await;

        assert_eq!(h.tap(ME, "cancel").await.text, messages::CANCELLED);
        assert!(h.say(ME, "500012345").await.is_none());
        assert_eq!(h.tap(ME, "cancel").await.text, messages::NOTHING_TO_CANCEL);
        assert!(h.fake.calls().is_empty());
    }

    #[tokio::test]
    async fn balance_and_its_failure() {
        let h = harness();
        h.fake.respond("/v1/getMe", json!({ "success": true, "balance": 1200 }));
        assert_eq!(h.tap(ME, "balance").await.text, "💰 موجودی شما: 1200 AFN");

        h.fake.respond("/v1/getMe", json!({ "success": false }));
        assert_eq!(h.tap(ME, "balance").await.text, messages::BALANCE_FAILED);

        h.fake.fail("/v1/getMe", Canned::Timeout);
        assert_eq!(h.tap(ME, "balance").await.text, messages::BALANCE_FAILED);
    }

    #[tokio::test]
    async fn help_is_static() {
        let h = harness();
        assert_eq!(h.tap(ME, "help").await.text, messages::HELP);
        assert!(h.fake.calls().is_empty());
    }
}
