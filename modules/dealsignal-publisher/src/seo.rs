use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use ai_client::{AiClient, ChatRequest, Message};
use dealsignal_common::types::VideoScript;

/// Static tag set attached to every upload.
pub const DEFAULT_TAGS: &[&str] = &[
    "DealSignal",
    "VDR",
    "Virtual Data Room",
    "M&A",
    "Due Diligence",
    "Fintech",
];

const RETRY_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Deserialize)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Deterministic metadata used when generation is unavailable: the script
/// title, a description pointing back at the source post, and the static
/// tag set plus the title words.
pub fn default_metadata(script: &VideoScript) -> SeoMetadata {
    let mut tags: Vec<String> = DEFAULT_TAGS.iter().map(|t| t.to_string()).collect();
    tags.extend(script.title.split_whitespace().map(|w| w.to_string()));

    SeoMetadata {
        title: script.title.clone(),
        description: format!(
            "An overview of '{}'. Learn more on the DealSignal blog: {}\n\nThis video was \
             generated as part of an automated content marketing initiative.",
            script.title, script.source_url
        ),
        tags,
    }
}

#[async_trait]
pub trait MetadataGenerator: Send + Sync {
    async fn generate(&self, script: &VideoScript) -> Result<SeoMetadata>;
}

/// Asks the chat-completion API for upload metadata as strict JSON. The
/// call is retried up to 3 times with a fixed 5-second delay; callers fall
/// back to `default_metadata` when it still fails.
pub struct AiMetadataGenerator {
    ai: AiClient,
}

impl AiMetadataGenerator {
    pub fn new(ai: AiClient) -> Self {
        Self { ai }
    }

    fn prompt(script: &VideoScript) -> String {
        format!(
            "Write SEO metadata for a YouTube video titled '{title}' based on the blog post at \
             {url}. Respond with ONLY a JSON object of the form \
             {{\"title\": string, \"description\": string, \"tags\": [string]}}. The title must \
             be under 100 characters, the description under 500, and there must be 5 to 12 \
             tags relevant to virtual data rooms, M&A, and corporate finance.",
            title = script.title,
            url = script.source_url,
        )
    }
}

#[async_trait]
impl MetadataGenerator for AiMetadataGenerator {
    async fn generate(&self, script: &VideoScript) -> Result<SeoMetadata> {
        let request = ChatRequest {
            model: self.ai.model().to_string(),
            messages: vec![Message::user(Self::prompt(script))],
            temperature: Some(0.3),
            max_tokens: Some(500),
        };

        let raw = self
            .ai
            .chat_with_retries(&request, RETRY_ATTEMPTS, RETRY_DELAY)
            .await?;

        parse_metadata_json(&raw)
            .ok_or_else(|| anyhow::anyhow!("metadata response was not the expected JSON shape"))
    }
}

/// Parse the model's JSON reply, tolerating a markdown code fence around it.
pub fn parse_metadata_json(raw: &str) -> Option<SeoMetadata> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    let meta: SeoMetadata = serde_json::from_str(body.trim()).ok()?;
    if meta.title.is_empty() || meta.description.is_empty() {
        return None;
    }
    Some(meta)
}

/// Generate metadata, falling back to the deterministic default after the
/// bounded retries are exhausted.
pub async fn metadata_or_default(
    generator: &dyn MetadataGenerator,
    script: &VideoScript,
) -> SeoMetadata {
    match generator.generate(script).await {
        Ok(meta) => meta,
        Err(e) => {
            warn!(title = %script.title, error = %e, "Metadata generation failed, using defaults");
            default_metadata(script)
        }
    }
}
