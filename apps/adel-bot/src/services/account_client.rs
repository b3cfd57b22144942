use crate::api_client::{Auth, ResellerTransport};
use crate::error::{StoreResult, UpstreamError};
use crate::models::Balance;
use adel_shared::api::AccountResponse;
use std::sync::Arc;

#[derive(Clone)]
pub struct AccountClient {
    api: Arc<dyn ResellerTransport>,
    default_currency: String,
}

impl AccountClient {
    pub fn new(api: Arc<dyn ResellerTransport>, default_currency: String) -> Self {
        Self {
            api,
            default_currency,
        }
    }

    pub async fn get_balance(&self) -> StoreResult<Balance> {
        let value = self.api.get("/v1/getMe", Auth::ApiKey).await?;
        let resp: AccountResponse = serde_json::from_value(value).map_err(UpstreamError::from)?;
        if !resp.success {
            return Err(UpstreamError::Rejected.into());
        }
        let amount = resp.balance.ok_or(UpstreamError::MissingField("balance"))?;

        Ok(Balance {
            amount,
            currency: resp
                .currency
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| self.default_currency.clone()),
        })
    }
}
