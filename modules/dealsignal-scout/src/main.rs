use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dealsignal_common::config::ScoutConfig;
use dealsignal_scout::discover_candidates;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dealsignal=info".parse()?))
        .init();

    info!("DealSignal scout starting...");

    let config = match ScoutConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Cannot start scout");
            return Ok(());
        }
    };

    let (items, stats) = discover_candidates(&config).await;

    if items.is_empty() {
        info!("No new relevant questions found in this session");
    } else {
        info!(count = items.len(), "Scraping session finished");
    }
    info!("{stats}");

    Ok(())
}
