use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ai_client::AiClient;
use dealsignal_common::config::{ReporterConfig, ScoutConfig};
use dealsignal_reporter::{AiCommentDrafter, Reporter};
use dealsignal_scout::discover_candidates;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dealsignal=info".parse()?))
        .init();

    info!("DealSignal engagement reporter starting...");

    // Credentials are checked before any network call; a missing key ends
    // the run quietly rather than raising.
    let config = match ReporterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Cannot start reporter");
            return Ok(());
        }
    };
    let scout_config = match ScoutConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Cannot start reporter");
            return Ok(());
        }
    };

    let (items, stats) = discover_candidates(&scout_config).await;
    info!("{stats}");

    if items.is_empty() {
        info!("No opportunities discovered; reports not updated");
        return Ok(());
    }

    let drafter = AiCommentDrafter::new(AiClient::new(&config.openai_api_key));
    let reporter = Reporter::new(&config.report_dir);

    let opportunities = reporter.build_opportunities(&drafter, items).await;
    reporter.write_reports(&opportunities);

    info!(count = opportunities.len(), "Engagement report complete");
    Ok(())
}
