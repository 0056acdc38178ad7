use std::collections::HashSet;
use std::time::Duration;

use rand::Rng;
use scraper::{Html, Selector};
use tracing::{info, warn};

use dealsignal_common::config::ScoutConfig;
use dealsignal_common::types::CandidateItem;

use crate::fetch::PageFetcher;
use crate::sites::{ScrapeTarget, SiteProfile};

/// Random jitter added on top of the base courtesy delay.
const JITTER_MAX_MS: u64 = 2000;

#[derive(Debug, Default)]
pub struct ScrapeStats {
    pub pages_fetched: u32,
    pub pages_failed: u32,
    pub items_found: u32,
    pub duplicates_skipped: u32,
}

impl std::fmt::Display for ScrapeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Scrape Run Complete ===")?;
        writeln!(f, "Pages fetched:      {}", self.pages_fetched)?;
        writeln!(f, "Pages failed:       {}", self.pages_failed)?;
        writeln!(f, "Items found:        {}", self.items_found)?;
        writeln!(f, "Duplicates skipped: {}", self.duplicates_skipped)?;
        Ok(())
    }
}

/// Sequential fetch-extract-dedup loop over scrape targets.
///
/// Failures are isolated per target; the only cross-target state is the
/// set of links already seen this run.
pub struct Scout {
    fetcher: Box<dyn PageFetcher>,
    delay: Duration,
    max_items: Option<usize>,
    seen: HashSet<String>,
    stats: ScrapeStats,
}

impl Scout {
    pub fn new(fetcher: Box<dyn PageFetcher>, config: &ScoutConfig) -> Self {
        Self {
            fetcher,
            delay: Duration::from_secs(config.courtesy_delay_secs),
            max_items: config.max_items,
            seen: HashSet::new(),
            stats: ScrapeStats::default(),
        }
    }

    /// Scrape every target of one site, deduplicating against everything
    /// already collected this run.
    pub async fn scrape_site(
        &mut self,
        profile: &SiteProfile,
        targets: &[ScrapeTarget],
    ) -> Vec<CandidateItem> {
        let mut found = Vec::new();

        for (i, target) in targets.iter().enumerate() {
            if self.at_capacity() {
                break;
            }
            if i > 0 {
                self.courtesy_pause().await;
            }

            info!(site = profile.name, tag = %target.tag, "Scraping target");
            let html = match self.fetcher.fetch(&target.url).await {
                Ok(html) => {
                    self.stats.pages_fetched += 1;
                    html
                }
                Err(e) => {
                    warn!(url = %target.url, error = %e, "Fetch failed, skipping target");
                    self.stats.pages_failed += 1;
                    continue;
                }
            };

            for item in extract_candidates(&html, profile, &target.tag) {
                if self.at_capacity() {
                    break;
                }
                if self.seen.insert(item.link.clone()) {
                    info!(title = %item.title, link = %item.link, "Item found");
                    self.stats.items_found += 1;
                    found.push(item);
                } else {
                    self.stats.duplicates_skipped += 1;
                }
            }
        }

        found
    }

    pub fn stats(&self) -> &ScrapeStats {
        &self.stats
    }

    pub fn into_stats(self) -> ScrapeStats {
        self.stats
    }

    fn at_capacity(&self) -> bool {
        self.max_items
            .is_some_and(|max| self.stats.items_found as usize >= max)
    }

    async fn courtesy_pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        let jitter = Duration::from_millis(rand::rng().random_range(0..JITTER_MAX_MS));
        tokio::time::sleep(self.delay + jitter).await;
    }
}

/// Pull candidate items out of one page. A selector that matches nothing
/// yields an empty list, not an error.
pub fn extract_candidates(html: &str, profile: &SiteProfile, tag: &str) -> Vec<CandidateItem> {
    let item_selector = match Selector::parse(profile.item_selector) {
        Ok(sel) => sel,
        Err(e) => {
            warn!(site = profile.name, selector = profile.item_selector, error = %e, "Bad item selector");
            return Vec::new();
        }
    };
    let title_selector = profile
        .title_selector
        .and_then(|raw| Selector::parse(raw).ok());

    let document = Html::parse_document(html);
    let mut items = Vec::new();

    for element in document.select(&item_selector) {
        let title = match (&title_selector, profile.title_selector) {
            (Some(sel), _) => element
                .select(sel)
                .next()
                .map(|t| collapse_text(&t.text().collect::<Vec<_>>().join(" "))),
            (None, None) => Some(collapse_text(&element.text().collect::<Vec<_>>().join(" "))),
            // Title selector configured but unparseable: treat as a miss.
            (None, Some(_)) => None,
        };
        let Some(title) = title.filter(|t| !t.is_empty()) else {
            continue;
        };

        let Some(href) = element.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        // Relative hrefs get the site base prepended verbatim; nothing is
        // otherwise rewritten, so dedup stays an exact-string comparison.
        let link = if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", profile.link_base, href)
        };

        items.push(CandidateItem::new(title, link, tag));
    }

    items
}

/// Collapse runs of whitespace the way rendered HTML does.
fn collapse_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use anyhow::Result;
    use async_trait::async_trait;

    use super::*;
    use crate::sites::{quora, reddit};

    struct StaticFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no page for {url}"))
        }
    }

    fn quick_config() -> ScoutConfig {
        ScoutConfig {
            user_agent: None,
            max_items: None,
            courtesy_delay_secs: 0,
        }
    }

    const QUORA_PAGE: &str = r#"
        <html><body>
          <a href="/question/What-is-a-virtual-data-room"><span class="qu-bold">What is a virtual data room?</span></a>
          <a href="https://www.quora.com/question/How-long-does-due-diligence-take"><span class="qu-bold">How long does due diligence take?</span></a>
          <a href="/question/No-title-span">bare anchor text</a>
        </body></html>
    "#;

    #[test]
    fn test_extract_quora_candidates() {
        let items = extract_candidates(QUORA_PAGE, &quora(), "Due-Diligence");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "What is a virtual data room?");
        assert_eq!(
            items[0].link,
            "https://www.quora.com/question/What-is-a-virtual-data-room"
        );
        assert_eq!(
            items[1].link,
            "https://www.quora.com/question/How-long-does-due-diligence-take"
        );
        assert!(items.iter().all(|i| i.source_tag == "Due-Diligence"));
    }

    #[test]
    fn test_extract_reddit_uses_anchor_text() {
        let html = r#"
            <html><body>
              <a class="search-title" href="https://old.reddit.com/r/finance/comments/abc/vdr_advice/">
                Which  VDR   for a small M&amp;A deal?
              </a>
            </body></html>
        "#;
        let items = extract_candidates(html, &reddit(), "r/finance:vdr");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Which VDR for a small M&A deal?");
    }

    #[test]
    fn test_extract_selector_miss_is_empty() {
        let items = extract_candidates("<html><body><p>nothing here</p></body></html>", &quora(), "t");
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_dedup_is_exact_link_match_across_targets() {
        let page = r#"<a href="/question/Same"><span class="qu-bold">Same question</span></a>"#;
        let pages = HashMap::from([
            ("https://q/one".to_string(), page.to_string()),
            ("https://q/two".to_string(), page.to_string()),
        ]);
        let mut scout = Scout::new(Box::new(StaticFetcher { pages }), &quick_config());

        let targets = vec![
            ScrapeTarget {
                tag: "one".to_string(),
                url: "https://q/one".to_string(),
            },
            ScrapeTarget {
                tag: "two".to_string(),
                url: "https://q/two".to_string(),
            },
        ];
        let items = scout.scrape_site(&quora(), &targets).await;

        assert_eq!(items.len(), 1);
        assert_eq!(scout.stats().duplicates_skipped, 1);

        let mut links: Vec<&str> = items.iter().map(|i| i.link.as_str()).collect();
        links.sort_unstable();
        links.dedup();
        assert_eq!(links.len(), items.len());
    }

    #[tokio::test]
    async fn test_failed_target_is_isolated() {
        let pages = HashMap::from([("https://q/good".to_string(), QUORA_PAGE.to_string())]);
        let mut scout = Scout::new(Box::new(StaticFetcher { pages }), &quick_config());

        let targets = vec![
            ScrapeTarget {
                tag: "broken".to_string(),
                url: "https://q/broken".to_string(),
            },
            ScrapeTarget {
                tag: "good".to_string(),
                url: "https://q/good".to_string(),
            },
        ];
        let items = scout.scrape_site(&quora(), &targets).await;

        assert_eq!(scout.stats().pages_failed, 1);
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_max_items_caps_collection() {
        let pages = HashMap::from([("https://q/page".to_string(), QUORA_PAGE.to_string())]);
        let config = ScoutConfig {
            max_items: Some(1),
            ..quick_config()
        };
        let mut scout = Scout::new(Box::new(StaticFetcher { pages }), &config);

        let targets = vec![ScrapeTarget {
            tag: "t".to_string(),
            url: "https://q/page".to_string(),
        }];
        let items = scout.scrape_site(&quora(), &targets).await;
        assert_eq!(items.len(), 1);
    }
}
