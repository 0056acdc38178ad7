use anyhow::Result;
use async_trait::async_trait;
use tracing::{info, warn};

use ai_client::AiClient;
use dealsignal_common::config::ContentConfig;
use dealsignal_common::types::VideoScript;
use dealsignal_scout::fetch::PageFetcher;

use crate::text::{extract_block_text, extract_post_links, title_from_slug, truncate_chars};

/// Title prefix applied to every generated script.
const TITLE_PREFIX: &str = "DealSignal Insights: ";

/// Blog-specific selector configuration, swappable the same way the scraper
/// site profiles are.
#[derive(Debug, Clone)]
pub struct BlogSource {
    pub index_url: String,
    pub post_link_selector: String,
    pub content_selector: String,
    pub max_posts: usize,
    pub content_budget_chars: usize,
}

impl BlogSource {
    pub fn from_config(config: &ContentConfig) -> Self {
        Self {
            index_url: config.blog_index_url.clone(),
            post_link_selector: "a.uael-post__read-more".to_string(),
            content_selector: "div.post-content".to_string(),
            max_posts: config.max_posts,
            content_budget_chars: config.content_budget_chars,
        }
    }
}

#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    async fn generate(&self, title: &str, content: &str) -> Result<String>;
}

/// Generates video scripts with the chat-completion API using a fixed
/// prompt template.
pub struct AiScriptGenerator {
    ai: AiClient,
}

impl AiScriptGenerator {
    pub fn new(ai: AiClient) -> Self {
        Self { ai }
    }

    fn prompt(title: &str, content: &str) -> String {
        format!(
            "Create a 2-minute video script for a YouTube video about '{title}'. The script \
             should be engaging, informative, and suitable for an audience of investment \
             bankers, VCs, and corporate development professionals. Base it on this content: \
             {content}"
        )
    }
}

#[async_trait]
impl ScriptGenerator for AiScriptGenerator {
    async fn generate(&self, title: &str, content: &str) -> Result<String> {
        let script = self
            .ai
            .complete(&Self::prompt(title, content), 0.7, 1000)
            .await?;
        Ok(script)
    }
}

/// Blog index → post bodies → video scripts. Every failure skips one post;
/// the batch always runs to the end.
pub struct ContentPipeline {
    fetcher: Box<dyn PageFetcher>,
    generator: Box<dyn ScriptGenerator>,
    source: BlogSource,
}

impl ContentPipeline {
    pub fn new(
        fetcher: Box<dyn PageFetcher>,
        generator: Box<dyn ScriptGenerator>,
        source: BlogSource,
    ) -> Self {
        Self {
            fetcher,
            generator,
            source,
        }
    }

    pub async fn run(&self) -> Vec<VideoScript> {
        info!(index = %self.source.index_url, "Scanning blog for latest posts");

        let index_html = match self.fetcher.fetch(&self.source.index_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = %self.source.index_url, error = %e, "Could not fetch blog index");
                return Vec::new();
            }
        };

        let links = extract_post_links(
            &index_html,
            &self.source.post_link_selector,
            &self.source.index_url,
            self.source.max_posts,
        );
        info!(count = links.len(), "Found blog posts");

        let mut scripts = Vec::new();
        for link in links {
            if let Some(script) = self.process_post(&link).await {
                scripts.push(script);
            }
        }

        info!(count = scripts.len(), "Content pipeline finished");
        scripts
    }

    async fn process_post(&self, link: &str) -> Option<VideoScript> {
        let html = match self.fetcher.fetch(link).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url = link, error = %e, "Could not fetch post, skipping");
                return None;
            }
        };

        let Some(content) = extract_block_text(&html, &self.source.content_selector) else {
            warn!(url = link, selector = %self.source.content_selector, "No content block, skipping");
            return None;
        };
        let content = truncate_chars(&content, self.source.content_budget_chars);

        let title = title_from_slug(link);
        let script_text = match self.generator.generate(&title, &content).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = link, error = %e, "Script generation failed, skipping");
                return None;
            }
        };

        info!(title = %title, chars = content.len(), "Generated video script");
        Some(VideoScript {
            title: format!("{TITLE_PREFIX}{title}"),
            script_text,
            source_url: link.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

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

    struct StubGenerator;

    #[async_trait]
    impl ScriptGenerator for StubGenerator {
        async fn generate(&self, title: &str, _content: &str) -> Result<String> {
            Ok(format!("script for {title}"))
        }
    }

    struct FailOnGenerator {
        failing_title: &'static str,
    }

    #[async_trait]
    impl ScriptGenerator for FailOnGenerator {
        async fn generate(&self, title: &str, _content: &str) -> Result<String> {
            if title == self.failing_title {
                anyhow::bail!("model unavailable")
            }
            Ok(format!("script for {title}"))
        }
    }

    const INDEX: &str = r#"
        <html><body>
          <a class="uael-post__read-more" href="/blog/first-post/">Read more</a>
          <a class="uael-post__read-more" href="/blog/second-post/">Read more</a>
          <a class="uael-post__read-more" href="/blog/third-post/">Read more</a>
        </body></html>
    "#;

    fn post_page(body: &str) -> String {
        format!(r#"<html><body><div class="post-content"><p>{body}</p></div></body></html>"#)
    }

    fn source() -> BlogSource {
        BlogSource {
            index_url: "https://blog.test/".to_string(),
            post_link_selector: "a.uael-post__read-more".to_string(),
            content_selector: "div.post-content".to_string(),
            max_posts: 3,
            content_budget_chars: 2000,
        }
    }

    fn pages() -> HashMap<String, String> {
        HashMap::from([
            ("https://blog.test/".to_string(), INDEX.to_string()),
            (
                "https://blog.test/blog/first-post/".to_string(),
                post_page("First body."),
            ),
            (
                "https://blog.test/blog/second-post/".to_string(),
                post_page("Second body."),
            ),
            (
                "https://blog.test/blog/third-post/".to_string(),
                post_page("Third body."),
            ),
        ])
    }

    #[tokio::test]
    async fn test_three_extractable_posts_yield_three_scripts() {
        let pipeline = ContentPipeline::new(
            Box::new(StaticFetcher { pages: pages() }),
            Box::new(StubGenerator),
            source(),
        );

        let scripts = pipeline.run().await;
        assert_eq!(scripts.len(), 3);

        let input_links = [
            "https://blog.test/blog/first-post/",
            "https://blog.test/blog/second-post/",
            "https://blog.test/blog/third-post/",
        ];
        for script in &scripts {
            assert!(!script.script_text.is_empty());
            assert!(input_links.contains(&script.source_url.as_str()));
            assert!(script.title.starts_with("DealSignal Insights: "));
        }
    }

    #[tokio::test]
    async fn test_generation_failure_skips_only_that_post() {
        let pipeline = ContentPipeline::new(
            Box::new(StaticFetcher { pages: pages() }),
            Box::new(FailOnGenerator {
                failing_title: "Second Post",
            }),
            source(),
        );

        let scripts = pipeline.run().await;
        assert_eq!(scripts.len(), 2);
        assert!(scripts
            .iter()
            .all(|s| s.source_url != "https://blog.test/blog/second-post/"));
    }

    #[tokio::test]
    async fn test_post_without_content_block_is_skipped() {
        let mut pages = pages();
        pages.insert(
            "https://blog.test/blog/second-post/".to_string(),
            "<html><body><p>no wrapper div</p></body></html>".to_string(),
        );

        let pipeline = ContentPipeline::new(
            Box::new(StaticFetcher { pages }),
            Box::new(StubGenerator),
            source(),
        );

        let scripts = pipeline.run().await;
        assert_eq!(scripts.len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_index_yields_empty_batch() {
        let pipeline = ContentPipeline::new(
            Box::new(StaticFetcher {
                pages: HashMap::new(),
            }),
            Box::new(StubGenerator),
            source(),
        );

        assert!(pipeline.run().await.is_empty());
    }
}
