use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rand::prelude::IndexedRandom;
use tracing::info;

/// Browser-style identifiers rotated when no fixed one is configured.
/// Sites rate-limit unfamiliar clients aggressively; a plain reqwest UA
/// gets empty or challenge pages.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:122.0) Gecko/20100101 Firefox/122.0",
];

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP fetcher. One GET per call, no rendering, no retries; callers
/// decide what a failed page costs.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(user_agent: Option<String>) -> Self {
        let user_agent = user_agent.unwrap_or_else(|| {
            USER_AGENTS
                .choose(&mut rand::rng())
                .expect("user agent pool is non-empty")
                .to_string()
        });
        info!(user_agent = %user_agent, "HTTP fetcher ready");

        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, user_agent }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("GET {url} returned status {status}");
        }

        Ok(resp.text().await?)
    }
}
