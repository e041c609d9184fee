//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use talk_to_jesus::adapters::history::InMemoryHistory;
use talk_to_jesus::adapters::provider;
use talk_to_jesus::adapters::ui::tui::TuiInputPort;
use talk_to_jesus::domain::ReplyCatalog;
use talk_to_jesus::ports::{HistoryPort, InputPort};
use talk_to_jesus::shared::config::AppConfig;
use talk_to_jesus::usecases::{ChatService, ProviderGateway, ResponseSelector};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();

    let cfg = AppConfig::load().unwrap_or_default();
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cfg.log_level_or_default())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    // --- Static reply material, built once and shared read-only ---
    let catalog = Arc::new(ReplyCatalog::standard());
    let selector = Arc::new(match cfg.reply_seed {
        Some(seed) => {
            info!(seed, "local replies use a fixed seed");
            ResponseSelector::with_seed(Arc::clone(&catalog), seed)
        }
        None => ResponseSelector::new(Arc::clone(&catalog)),
    });

    // --- Provider (None = local replies only) ---
    let provider =
        provider::from_config(&cfg).map_err(|e| anyhow::anyhow!("provider setup: {}", e))?;
    let gateway = Arc::new(
        ProviderGateway::new(provider, selector)
            .with_timeout(cfg.timeout_or_default())
            .with_max_output_len(cfg.max_output_tokens_or_default()),
    );
    info!(
        provider = gateway.provider_name(),
        timeout_secs = cfg.timeout_or_default().as_secs(),
        max_output_tokens = gateway.max_output_len(),
        "reply gateway ready"
    );

    // --- Services ---
    let history: Arc<dyn HistoryPort> = Arc::new(InMemoryHistory::new());
    let chat = Arc::new(
        ChatService::new(Arc::clone(&gateway), history)
            .with_max_message_length(cfg.max_message_length_or_default()),
    );

    talk_to_jesus::adapters::ui::init_ui(gateway.provider_name());

    let identifier = std::env::var("USER").unwrap_or_else(|_| "terminal".to_string());
    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(Arc::clone(&chat), identifier));

    // --- Run (main menu -> Chat / Scripture / Prayer / History / Stats) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let stats = chat.stats().await;
    info!(
        messages = stats.total_messages,
        callers = stats.unique_identifiers,
        "session ended"
    );
    Ok(())
}
