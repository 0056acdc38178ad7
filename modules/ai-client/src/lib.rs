pub mod error;
pub mod types;

pub use error::{AiError, Result};
pub use types::{ChatRequest, ChatResponse, Message};

use std::time::Duration;

use tracing::{debug, warn};

const OPENAI_API_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct AiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AiClient {
    pub fn new(api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.to_string(),
            base_url: OPENAI_API_URL.to_string(),
            model: "gpt-4.1-mini".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One chat-completion round trip. Returns `choices[0].message.content`.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(model = %request.model, "Chat completion request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = resp.json().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }

    /// Convenience wrapper: single user message with the client's default
    /// model.
    pub async fn complete(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            temperature: Some(temperature),
            max_tokens: Some(max_tokens),
        };
        self.chat(&request).await
    }

    /// Retry `chat` up to `attempts` times with a fixed delay between
    /// attempts. Returns the last error if every attempt fails.
    pub async fn chat_with_retries(
        &self,
        request: &ChatRequest,
        attempts: u32,
        delay: Duration,
    ) -> Result<String> {
        let mut last_err = AiError::EmptyResponse;
        for attempt in 1..=attempts {
            match self.chat(request).await {
                Ok(content) => return Ok(content),
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "Chat completion attempt failed");
                    last_err = e;
                    if attempt < attempts {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }
        Err(last_err)
    }
}
