use crate::error::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const API_KEY_HEADER: &str = "X-API-Key";

/// Whether a request carries the reseller API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Anonymous,
    ApiKey,
}

/// HTTP seam between the store clients and the reseller API.
#[async_trait]
pub trait ResellerTransport: Send + Sync {
    async fn get(&self, path: &str, auth: Auth) -> Result<Value, UpstreamError>;

    /// Always credentialed.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, UpstreamError>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ResellerTransport for ApiClient {
    async fn get(&self, path: &str, auth: Auth) -> Result<Value, UpstreamError> {
        let mut req = self.client.get(self.url(path));
        if auth == Auth::ApiKey {
            req = req.header(API_KEY_HEADER, &self.api_key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(UpstreamError::Status(resp.status().as_u16()));
        }

        Ok(resp.json().await?)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, UpstreamError> {
        let resp = self
            .client
            .post(self.url(path))
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(UpstreamError::Status(resp.status().as_u16()));
        }

        Ok(resp.json().await?)
    }
}
