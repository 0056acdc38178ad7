use std::env;
use std::path::PathBuf;

use crate::error::DealSignalError;

/// Configuration for the topic/query scraper. Nothing here is a credential;
/// every field has a default.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    /// Fixed client identifier header. When unset a built-in one is picked
    /// at random per run.
    pub user_agent: Option<String>,
    /// Stop collecting once this many unique items have been found.
    pub max_items: Option<usize>,
    /// Base courtesy delay between outbound requests, in seconds.
    pub courtesy_delay_secs: u64,
}

impl ScoutConfig {
    pub fn from_env() -> Result<Self, DealSignalError> {
        Ok(Self {
            user_agent: optional_env("SCOUT_USER_AGENT"),
            max_items: parse_optional("SCOUT_MAX_ITEMS")?,
            courtesy_delay_secs: parse_or("SCOUT_COURTESY_DELAY_SECS", 3)?,
        })
    }
}

/// Configuration for the engagement reporter.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    pub openai_api_key: String,
    /// Directory the report artifacts are written into. Both files are
    /// overwritten on every run.
    pub report_dir: PathBuf,
}

impl ReporterConfig {
    pub fn from_env() -> Result<Self, DealSignalError> {
        Ok(Self {
            openai_api_key: required_env("OPENAI_API_KEY")?,
            report_dir: optional_env("REPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

/// Configuration for the blog-to-script content pipeline.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub openai_api_key: String,
    pub blog_index_url: String,
    pub max_posts: usize,
    /// Character budget applied to extracted post bodies before prompting.
    pub content_budget_chars: usize,
}

impl ContentConfig {
    pub fn from_env() -> Result<Self, DealSignalError> {
        Ok(Self {
            openai_api_key: required_env("OPENAI_API_KEY")?,
            blog_index_url: optional_env("BLOG_INDEX_URL")
                .unwrap_or_else(|| "https://www.dealsignal.io/blog/".to_string()),
            max_posts: parse_or("CONTENT_MAX_POSTS", 3)?,
            content_budget_chars: parse_or("CONTENT_BUDGET_CHARS", 2000)?,
        })
    }
}

/// Configuration for the publish orchestrator. Supersets the content
/// pipeline config with the video-generation and upload credentials.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub content: ContentConfig,
    pub runway_api_key: String,
    pub youtube_client_id: String,
    pub youtube_client_secret: String,
    pub youtube_token_path: PathBuf,
    pub video_output_dir: PathBuf,
}

impl PublisherConfig {
    pub fn from_env() -> Result<Self, DealSignalError> {
        Ok(Self {
            content: ContentConfig::from_env()?,
            runway_api_key: required_env("RUNWAY_API_KEY")?,
            youtube_client_id: required_env("YOUTUBE_CLIENT_ID")?,
            youtube_client_secret: required_env("YOUTUBE_CLIENT_SECRET")?,
            youtube_token_path: optional_env("YOUTUBE_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("token.json")),
            video_output_dir: optional_env("VIDEO_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        })
    }

    /// Log the non-secret parts of the config at startup.
    pub fn log_redacted(&self) {
        tracing::info!(
            blog_index_url = %self.content.blog_index_url,
            max_posts = self.content.max_posts,
            token_path = %self.youtube_token_path.display(),
            output_dir = %self.video_output_dir.display(),
            "Publisher config loaded"
        );
    }
}

fn required_env(key: &str) -> Result<String, DealSignalError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().to_string())
        .ok_or_else(|| DealSignalError::Config(format!("{key} environment variable is required")))
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, DealSignalError> {
    match optional_env(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| DealSignalError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(default),
    }
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, DealSignalError> {
    match optional_env(key) {
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| DealSignalError::Config(format!("{key} must be a number, got {raw:?}"))),
        None => Ok(None),
    }
}
