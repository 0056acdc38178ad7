use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ai_client::AiClient;
use dealsignal_common::config::ContentConfig;
use dealsignal_content::{AiScriptGenerator, BlogSource, ContentPipeline};
use dealsignal_scout::fetch::HttpFetcher;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dealsignal=info".parse()?))
        .init();

    info!("DealSignal content pipeline starting...");

    let config = match ContentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Cannot start content pipeline");
            return Ok(());
        }
    };

    let pipeline = ContentPipeline::new(
        Box::new(HttpFetcher::new(None)),
        Box::new(AiScriptGenerator::new(AiClient::new(&config.openai_api_key))),
        BlogSource::from_config(&config),
    );

    let scripts = pipeline.run().await;
    for script in &scripts {
        info!(title = %script.title, source = %script.source_url, "Script ready");
    }
    info!(count = scripts.len(), "Content pipeline complete");

    Ok(())
}
