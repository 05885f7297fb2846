use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{Config, MarketDataClient, ReportFormat};
use engine::{InMemoryMarketData, Screener, YahooChartClient};
use strategy::ScreenerConfig;

mod report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env()?;
    let screener_cfg = ScreenerConfig::load(&cfg.screener_config_path)?;
    info!(
        config = %cfg.screener_config_path,
        symbols = screener_cfg.symbols.len(),
        "Momentum screener starting"
    );

    // ── Market data (offline file or chart API) ───────────────────────────────
    let client: Arc<dyn MarketDataClient> = match &cfg.market_data_file {
        Some(path) => {
            info!(path = %path, "Using offline market data");
            Arc::new(InMemoryMarketData::load(path).await?)
        }
        None => {
            info!(base_url = %cfg.market_data_base_url, "Using chart API market data");
            Arc::new(YahooChartClient::new(&cfg.market_data_base_url)?)
        }
    };

    // ── Batch run ─────────────────────────────────────────────────────────────
    // Symbols on the command line replace the configured list
    let args: Vec<String> = std::env::args().skip(1).collect();
    let screener = Screener::new(client, screener_cfg);
    let batch = if args.is_empty() {
        screener.run().await
    } else {
        screener.analyze_batch(args.as_slice()).await
    };

    if batch.all.is_empty() {
        warn!("No instrument could be analyzed");
    }

    // ── Output ────────────────────────────────────────────────────────────────
    match cfg.report_format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&batch)?),
        ReportFormat::Text => print!("{}", report::render_text(&batch)),
    }

    Ok(())
}
