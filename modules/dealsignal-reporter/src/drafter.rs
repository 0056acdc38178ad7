use anyhow::Result;
use async_trait::async_trait;

use ai_client::AiClient;
use dealsignal_common::types::CandidateItem;

/// Canned reply used whenever drafting fails. A run never stops because the
/// text-generation API is down.
pub const DEFAULT_COMMENT: &str = "Great question — secure document handling comes up in nearly \
every M&A and fundraising process. A virtual data room keeps diligence documents organized, \
access-controlled, and auditable from first contact through close. The DealSignal blog has \
practical guides on running a clean diligence process if you want to dig deeper.";

#[async_trait]
pub trait CommentDrafter: Send + Sync {
    async fn draft(&self, item: &CandidateItem) -> Result<String>;
}

/// Drafts replies with the chat-completion API using a fixed prompt
/// template.
pub struct AiCommentDrafter {
    ai: AiClient,
}

impl AiCommentDrafter {
    pub fn new(ai: AiClient) -> Self {
        Self { ai }
    }

    fn prompt(item: &CandidateItem) -> String {
        format!(
            "Draft a brief, genuinely helpful reply to this question from someone researching \
             '{tag}': \"{title}\" ({link}). The reader is likely a founder, lawyer, or finance \
             professional. Answer the question first; mention that DealSignal provides virtual \
             data rooms only where it is actually relevant. Under 120 words, no marketing fluff, \
             no greeting or sign-off.",
            tag = item.source_tag,
            title = item.title,
            link = item.link,
        )
    }
}

#[async_trait]
impl CommentDrafter for AiCommentDrafter {
    async fn draft(&self, item: &CandidateItem) -> Result<String> {
        let reply = self.ai.complete(&Self::prompt(item), 0.7, 300).await?;
        Ok(reply.trim().to_string())
    }
}
