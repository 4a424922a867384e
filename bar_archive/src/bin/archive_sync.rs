use anyhow::Result;
use clap::Parser;

use bar_archive::{
    config::ArchiveConfig,
    reconcile::{FetchWindow, Reconciler},
    store::LocalStore,
};
use market_data_feed::{credentials::AlpacaCredentials, providers::alpaca_rest::AlpacaFeed};

#[derive(Parser)]
#[command(version, about = "Daily bar archive sync")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: String,

    /// Override the configured fetch window, in days back from today
    #[arg(long)]
    days: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ArchiveConfig::load(cli.config.as_ref())?;

    let credentials = AlpacaCredentials::resolve(config.secrets_file.as_deref())?;
    let feed = AlpacaFeed::new(&credentials)?;
    let store = LocalStore::new(&config.data_dir)?;

    let days = cli.days.unwrap_or(config.days_to_fetch);
    let window = FetchWindow::last_days(days);

    let reconciler = Reconciler::new(feed, store, config);
    let report = reconciler.run(window).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.failed() > 0 {
        tracing::warn!(failed = report.failed(), "run finished with failures");
        std::process::exit(1);
    }

    Ok(())
}
