use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discovered question/post: the unit the scraper emits.
///
/// Uniqueness within a run is by exact `link` string match. URLs are kept
/// verbatim as found on the page (after resolving relative hrefs), never
/// normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItem {
    pub title: String,
    pub link: String,
    /// Topic slug, or `r/{subreddit}:{keyword}` for search-based sources.
    pub source_tag: String,
    pub discovered_at: DateTime<Utc>,
}

impl CandidateItem {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        source_tag: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            source_tag: source_tag.into(),
            discovered_at: Utc::now(),
        }
    }
}

/// A CandidateItem plus an optional drafted reply, as persisted by the
/// engagement reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementOpportunity {
    #[serde(flatten)]
    pub item: CandidateItem,
    pub suggested_comment: Option<String>,
}

/// A generated video script, produced by the content pipeline and consumed
/// by the publisher. In-memory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoScript {
    pub title: String,
    pub script_text: String,
    pub source_url: String,
}
