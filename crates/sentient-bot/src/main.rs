//! Sentient Bot entry point

use std::sync::Arc;
use std::time::Duration;

use crypto_market::{CoinGeckoClient, MarketDataClient};
use sentient_core::{Assistant, LlmProvider, SessionStore};
use sentient_runtime::HuggingFaceProvider;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sentient_bot::telegram::{self, Command};
use sentient_bot::{BotConfig, Conversation, FaqTree, http};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    // Language model
    if config.inference.token.is_none() {
        tracing::warn!("⚠ HF_TOKEN not set - Dobby answers will fail");
    }
    let provider: Arc<dyn LlmProvider> =
        Arc::new(HuggingFaceProvider::from_config(config.inference.clone())?);
    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Connected to {}", provider.name()),
        Ok(false) | Err(_) => tracing::warn!("⚠ {} not reachable - answers may fail", provider.name()),
    }
    let assistant = Assistant::new(provider, config.model.clone());
    tracing::info!("  Model: {}", assistant.model());

    // Market data
    let market: Arc<dyn MarketDataClient> = Arc::new(CoinGeckoClient::new(config.market.clone())?);
    if market.health_check().await {
        tracing::info!("✓ Connected to {}", market.name());
    } else {
        tracing::warn!("⚠ {} not reachable - crypto reports will show not found", market.name());
    }

    // FAQ
    let faq = match &config.faq_path {
        Some(path) => FaqTree::load(path)?,
        None => FaqTree::builtin(),
    };
    tracing::info!("Loaded {} FAQ categories", faq.categories().len());

    let sessions = Arc::new(SessionStore::new(config.session_ttl));
    let engine = Arc::new(Conversation::new(
        sessions.clone(),
        assistant,
        market,
        Arc::new(faq),
        config.form_link.clone(),
    ));

    // Expired awaiting modes
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                let remaining = sessions.len().await;
                tracing::debug!(purged, remaining, "expired sessions removed");
            }
        }
    });

    let bind_addr = config.bind_addr;
    tokio::spawn(async move {
        if let Err(e) = http::serve(bind_addr).await {
            tracing::error!("HTTP endpoint stopped: {:#}", e);
        }
    });

    let bot = Bot::new(&config.bot_token);
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Could not register bot commands: {}", e);
    }

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 Sentient Bot polling for updates");
    tracing::info!("══════════════════════════════════════════════════");

    telegram::run(bot, engine).await;

    tracing::info!("Shutting down");
    Ok(())
}
