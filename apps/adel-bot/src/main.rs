use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api_client;
mod bot;
mod config;
mod error;
pub mod models;
mod services;
mod state;
#[cfg(test)]
mod testing;

use crate::api_client::{ApiClient, ResellerTransport};
use crate::bot::controller::ConversationController;
use crate::config::BotConfig;
use crate::services::{AccountClient, CatalogClient, OrderClient, PendingPurchaseRegistry};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adel_bot=info,teloxide=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Adel Store Bot...");

    let config = BotConfig::load().inspect_err(|e| {
        tracing::error!("Configuration error: {:#}", e);
    })?;
    tracing::info!("Reseller API: {}", config.reseller_base_url);
    tracing::info!("Purchase route: {:?}", config.purchase_route);

    let api_client = ApiClient::new(
        config.reseller_base_url.clone(),
        config.api_key.clone(),
        config.request_timeout(),
    )?;
    if !api_client.has_api_key() {
        tracing::warn!("MZR_API_KEY is not set; balance, package list and purchases will fail upstream");
    }
    let api: Arc<dyn ResellerTransport> = Arc::new(api_client);

    let pending = Arc::new(PendingPurchaseRegistry::new(config.pending_ttl()));
    if let Some(ttl) = config.pending_ttl() {
        start_pending_sweeper(pending.clone(), ttl);
    }

    let controller = ConversationController::new(
        CatalogClient::new(api.clone()),
        AccountClient::new(api.clone(), config.balance_currency.clone()),
        OrderClient::new(api, config.purchase_route),
        pending,
        config.package_filter.clone(),
    );

    let bot = Bot::new(config.bot_token.clone());

    let (shutdown_tx, shutdown_rx) = tokio::sync::broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    bot::run_bot(bot, shutdown_rx, controller).await
}

fn start_pending_sweeper(pending: Arc<PendingPurchaseRegistry>, ttl: Duration) {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(ttl.min(Duration::from_secs(60)));
        loop {
            tick.tick().await;

            if pending.is_empty() {
                continue;
            }
            let removed = pending.purge_expired();
            if removed > 0 {
                tracing::info!(removed, remaining = pending.len(), "expired pending purchases dropped");
            }
        }
    });
}
