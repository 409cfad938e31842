mod gateway;

use clap::Parser;
use hora_core::config;
use hora_telegram::{BotSession, OffsetStore};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "hora",
    version,
    about = "Telegram bot that answers /hora with the current time"
)]
struct Cli {
    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // TOKEN, CHAT_ID and LOG_LEVEL may come from a local .env file.
    let _ = dotenvy::dotenv();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.log.level)),
        )
        .init();

    match &cfg.source {
        Some(path) => info!("Config: {}", path.display()),
        None => info!("Config file not found at {}, using defaults", cli.config),
    }

    let store = OffsetStore::new(cfg.state.offset_path());
    let session = BotSession::open(&cfg.bot, store).await?;

    let gw = gateway::Gateway::new(session, &cfg.bot);
    gw.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl-C, running until killed: {e}");
            std::future::pending::<()>().await;
        }
    })
    .await
}
