pub mod fetch;
pub mod scrape;
pub mod sites;

pub use fetch::{HttpFetcher, PageFetcher};
pub use scrape::{extract_candidates, ScrapeStats, Scout};
pub use sites::{ScrapeTarget, SiteProfile};

use dealsignal_common::config::ScoutConfig;
use dealsignal_common::types::CandidateItem;

/// Scrape both built-in site profiles with one shared dedup set and return
/// everything found, newest-run only.
pub async fn discover_candidates(config: &ScoutConfig) -> (Vec<CandidateItem>, ScrapeStats) {
    let fetcher = HttpFetcher::new(config.user_agent.clone());
    let mut scout = Scout::new(Box::new(fetcher), config);

    let mut items = scout
        .scrape_site(&sites::quora(), &sites::quora_targets(sites::QUORA_TOPICS))
        .await;
    items.extend(
        scout
            .scrape_site(
                &sites::reddit(),
                &sites::reddit_targets(sites::SUBREDDITS, sites::KEYWORDS),
            )
            .await,
    );

    (items, scout.into_stats())
}
