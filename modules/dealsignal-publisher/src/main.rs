use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ai_client::AiClient;
use dealsignal_common::config::PublisherConfig;
use dealsignal_content::{AiScriptGenerator, BlogSource, ContentPipeline};
use dealsignal_publisher::{
    AiMetadataGenerator, Publisher, RunwayGenerator, YouTubeUploader,
};
use dealsignal_scout::fetch::HttpFetcher;
use runway_client::RunwayClient;
use youtube_client::YouTubeClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dealsignal=info".parse()?))
        .init();

    info!("DealSignal publish pipeline starting...");

    // All credentials are checked up front; a missing one ends the run
    // before any network call is made.
    let config = match PublisherConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Cannot start publisher");
            return Ok(());
        }
    };
    config.log_redacted();

    let pipeline = ContentPipeline::new(
        Box::new(HttpFetcher::new(None)),
        Box::new(AiScriptGenerator::new(AiClient::new(
            &config.content.openai_api_key,
        ))),
        BlogSource::from_config(&config.content),
    );

    let scripts = pipeline.run().await;
    if scripts.is_empty() {
        info!("No scripts were generated; nothing to publish");
        return Ok(());
    }

    let publisher = Publisher::new(
        Box::new(RunwayGenerator::new(RunwayClient::new(
            &config.runway_api_key,
        ))),
        Box::new(YouTubeUploader::new(YouTubeClient::new(
            &config.youtube_client_id,
            &config.youtube_client_secret,
            &config.youtube_token_path,
        ))),
        Box::new(AiMetadataGenerator::new(AiClient::new(
            &config.content.openai_api_key,
        ))),
        &config.video_output_dir,
    );

    let stats = publisher.publish_all(&scripts).await;
    info!("{stats}");

    Ok(())
}
