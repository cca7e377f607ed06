use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use memesignal::application::{ConsoleNotifier, ConsoleRenderer, TrackerService};
use memesignal::infrastructure::market::DexScreenerClient;
use memesignal::shared::config::ConfigLoader;
use memesignal::shared::types::TrackerConfig;

#[derive(Parser, Debug)]
#[command(version, about = "Multi-chain meme token price tracker with threshold alerts")]
struct Args {
    /// Token contract address: Ethereum (0x..., 42 chars) or Solana (Base58)
    #[arg(long)]
    address: Option<String>,

    /// Alert if price goes above this value (USD); 0 disables
    #[arg(long)]
    alert_above: Option<f64>,

    /// Alert if price drops below this value (USD); 0 disables
    #[arg(long)]
    alert_below: Option<f64>,

    /// Poll interval in seconds
    #[arg(long)]
    interval: Option<u64>,

    /// Quote cache TTL in seconds
    #[arg(long)]
    cache_ttl: Option<u64>,

    /// Upstream fetch timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Upstream aggregator base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    // Load base configuration from file if provided, else defaults
    let mut config = if let Some(config_path) = &args.config {
        ConfigLoader::load_config(config_path)?
    } else {
        TrackerConfig::default()
    };

    // Override with CLI args if provided (CLI has higher priority)
    if let Some(address) = args.address {
        config.address = address.trim().to_string();
    }
    if let Some(alert_above) = args.alert_above {
        config.alert.high = Some(alert_above);
    }
    if let Some(alert_below) = args.alert_below {
        config.alert.low = Some(alert_below);
    }
    if let Some(interval) = args.interval {
        config.poll_interval_secs = interval;
    }
    if let Some(cache_ttl) = args.cache_ttl {
        config.cache_ttl_secs = cache_ttl;
    }
    if let Some(timeout) = args.timeout {
        config.upstream.fetch_timeout_secs = timeout;
    }
    if let Some(api_url) = args.api_url {
        config.upstream.base_url = api_url;
    }

    let api = Arc::new(DexScreenerClient::new(&config.upstream)?);
    let mut tracker = TrackerService::new(
        config,
        api,
        Arc::new(ConsoleNotifier),
        Arc::new(ConsoleRenderer::default()),
    )?;

    tracker.run().await?;
    Ok(())
}
