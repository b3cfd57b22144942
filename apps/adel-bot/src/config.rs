use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::str::FromStr;
use std::time::Duration;

const CONFIG_PATHS: [&str; 2] = ["/etc/adel/bot.toml", "./bot.toml"];

#[derive(Clone, Deserialize)]
pub struct BotConfig {
    pub bot_token: String,
    pub reseller_base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_pending_ttl_secs")]
    pub pending_ttl_secs: u64,
    #[serde(default)]
    pub purchase_route: PurchaseRoute,
    #[serde(default = "default_package_filter")]
    pub package_filter: String,
    #[serde(default = "default_currency")]
    pub balance_currency: String,
}

/// Which purchase endpoint the reseller account is provisioned for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseRoute {
    /// `POST /v1/topup/pubgMobile/offers/{id}/purchase`
    #[default]
    Offers,
    /// `POST /v1/products/{id}/purchase`
    Products,
}

impl PurchaseRoute {
    pub fn path(self, product_id: i64) -> String {
        match self {
            PurchaseRoute::Offers => format!("/v1/topup/pubgMobile/offers/{}/purchase", product_id),
            PurchaseRoute::Products => format!("/v1/products/{}/purchase", product_id),
        }
    }
}

impl FromStr for PurchaseRoute {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offers" => Ok(PurchaseRoute::Offers),
            "products" => Ok(PurchaseRoute::Products),
            other => Err(anyhow!("unknown PURCHASE_ROUTE `{}` (expected offers|products)", other)),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_pending_ttl_secs() -> u64 {
    600
}

fn default_package_filter() -> String {
    "UC".to_string()
}

fn default_currency() -> String {
    "AFN".to_string()
}

impl BotConfig {
    pub fn load() -> Result<Self> {
        for path in CONFIG_PATHS {
            if let Ok(contents) = fs::read_to_string(path) {
                tracing::info!("Loading config from {}", path);
                let config: BotConfig =
                    toml::from_str(&contents).with_context(|| format!("parsing {}", path))?;
                return config.validated();
            }
        }

        tracing::info!("Loading config from environment");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            bot_token: non_empty("BOT_TOKEN").ok_or_else(|| anyhow!("BOT_TOKEN is not set"))?,
            reseller_base_url: non_empty("MZR_BASE").ok_or_else(|| anyhow!("MZR_BASE is not set"))?,
            api_key: lookup("MZR_API_KEY").unwrap_or_default(),
            request_timeout_secs: parse_or(&non_empty, "REQUEST_TIMEOUT_SECS", default_timeout_secs())?,
            pending_ttl_secs: parse_or(&non_empty, "PENDING_TTL_SECS", default_pending_ttl_secs())?,
            purchase_route: parse_or(&non_empty, "PURCHASE_ROUTE", PurchaseRoute::default())?,
            package_filter: lookup("PACKAGE_FILTER").unwrap_or_else(default_package_filter),
            balance_currency: non_empty("BALANCE_CURRENCY").unwrap_or_else(default_currency),
        };
        config.validated()
    }

    fn validated(mut self) -> Result<Self> {
        if self.bot_token.trim().is_empty() {
            return Err(anyhow!("BOT_TOKEN is not set"));
        }
        if self.reseller_base_url.trim().is_empty() {
            return Err(anyhow!("reseller base url is not set"));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("request timeout must be at least one second"));
        }
        self.reseller_base_url = self.reseller_base_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// `None` keeps pending purchases until they are resolved or cancelled.
    pub fn pending_ttl(&self) -> Option<Duration> {
        (self.pending_ttl_secs > 0).then(|| Duration::from_secs(self.pending_ttl_secs))
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid {}=`{}`: {}", key, raw, e)),
        None => Ok(default),
    }
}
