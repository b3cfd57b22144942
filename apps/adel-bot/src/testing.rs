//! In-memory reseller API for unit tests.

use crate::api_client::{Auth, ResellerTransport};
use crate::error::UpstreamError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum Canned {
    Json(Value),
    Timeout,
    Status(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub auth: Auth,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Canned::Json(body));
    }

    pub fn fail(&self, path: &str, canned: Canned) {
        self.routes.lock().unwrap().insert(path.to_string(), canned);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.path == path)
            .collect()
    }

    fn answer(&self, call: Call) -> Result<Value, UpstreamError> {
        let canned = self.routes.lock().unwrap().get(&call.path).cloned();
        self.calls.lock().unwrap().push(call);
        match canned {
            Some(Canned::Json(v)) => Ok(v),
            Some(Canned::Timeout) => Err(UpstreamError::Timeout),
            Some(Canned::Status(code)) => Err(UpstreamError::Status(code)),
            None => Err(UpstreamError::Status(404)),
        }
    }
}

#[async_trait]
impl ResellerTransport for FakeTransport {
    async fn get(&self, path: &str, auth: Auth) -> Result<Value, UpstreamError> {
        self.answer(Call {
            method: "GET",
            path: path.to_string(),
            auth,
            body: None,
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, UpstreamError> {
        self.answer(Call {
            method: "POST",
            path: path.to_string(),
            auth: Auth::ApiKey,
            body: Some(body.clone()),
        })
    }
}
