mod daily;
mod monitor;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use quakewatch_feed::FeedClient;
use quakewatch_notify::TelegramClient;

#[derive(Debug, Parser)]
#[command(name = "quakewatch")]
#[command(about = "USGS earthquake monitor with Telegram alerts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll the feed forever and alert on new events (the default).
    Monitor,
    /// Fetch the feed once and send the daily summary now.
    Report,
    /// Send the fixed test alert to every recipient.
    Test,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = quakewatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let feed = FeedClient::new(&config.feed_url, config.request_timeout_secs)?;
    let notify = TelegramClient::new(&config.bot_token, config.request_timeout_secs)?;

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Report) => daily::send_daily_report(&config, &feed, &notify).await?,
        Some(Commands::Test) => daily::send_test_alert(&config, &notify).await,
        Some(Commands::Monitor) | None => monitor::run(&config, &feed, &notify).await,
    }

    Ok(())
}
