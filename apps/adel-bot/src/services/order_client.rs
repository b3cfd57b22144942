use crate::api_client::ResellerTransport;
use crate::config::PurchaseRoute;
use crate::error::{StoreError, StoreResult, UpstreamError};
use crate::models::PurchaseOutcome;
use adel_shared::api::{PurchaseRequest, PurchaseResponse};
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderClient {
    api: Arc<dyn ResellerTransport>,
    route: PurchaseRoute,
}

impl OrderClient {
    pub fn new(api: Arc<dyn ResellerTransport>, route: PurchaseRoute) -> Self {
        Self { api, route }
    }

    /// Places one order. Player id format is left to the reseller, which
    /// answers `accepted == false` for ids it does not know.
    pub async fn purchase(&self, product_id: i64, player_id: &str) -> StoreResult<PurchaseOutcome> {
        let player_id = player_id.trim();
        if player_id.is_empty() {
            return Err(StoreError::Validation("player id is empty".into()));
        }

        let body = serde_json::to_value(PurchaseRequest {
            player_id: player_id.to_string(),
        })
        .map_err(UpstreamError::from)?;
        let value = self.api.post(&self.route.path(product_id), &body).await?;
        let resp: PurchaseResponse = serde_json::from_value(value).map_err(UpstreamError::from)?;

        Ok(resp.into())
    }
}
