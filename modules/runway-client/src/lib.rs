pub mod error;
pub mod types;

pub use error::{Result, RunwayError};
pub use types::{classify_status, TaskData, TaskOutput, TaskState, TextToVideoInput};

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

const BASE_URL: &str = "https://api.dev.runwayml.com/v1";
const API_VERSION: &str = "2024-11-06";

/// Fixed poll cadence against the task-status endpoint.
const POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Wall-clock budget for a single generation task. A task still pending
/// after this is abandoned.
const POLL_TIMEOUT: Duration = Duration::from_secs(600);

pub struct RunwayClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl RunwayClient {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.trim().to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Submit a text-to-video task. Returns immediately with task metadata.
    pub async fn submit_text_to_video(&self, input: &TextToVideoInput) -> Result<TaskData> {
        let url = format!("{}/text_to_video", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-Runway-Version", API_VERSION)
            .json(input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RunwayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    /// Poll a task until it reaches a terminal status or the wall-clock
    /// timeout elapses. There is no cancellation; a stuck task is simply
    /// abandoned when the budget runs out.
    pub async fn wait_for_task(&self, task_id: &str) -> Result<TaskData> {
        let deadline = Instant::now() + POLL_TIMEOUT;

        loop {
            tokio::time::sleep(POLL_INTERVAL).await;
            if Instant::now() >= deadline {
                return Err(RunwayError::Timeout(POLL_TIMEOUT.as_secs()));
            }

            let url = format!("{}/tasks/{}", self.base_url, task_id);
            let resp = self
                .client
                .get(&url)
                .bearer_auth(&self.api_key)
                .header("X-Runway-Version", API_VERSION)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                return Err(RunwayError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let task: TaskData = resp.json().await?;
            let raw_status = task.status.as_deref().unwrap_or("");
            match classify_status(raw_status) {
                TaskState::Succeeded => return Ok(task),
                TaskState::Failed => {
                    let detail = task
                        .failure
                        .filter(|f| !f.is_empty())
                        .map(|f| format!("{raw_status}: {f}"))
                        .unwrap_or_else(|| raw_status.to_string());
                    return Err(RunwayError::TaskFailed(detail));
                }
                TaskState::Pending => {
                    debug!(task_id, status = raw_status, "Task still in progress");
                }
            }
        }
    }

    /// Download a finished output to `dest`.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RunwayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        info!(dest = %dest.display(), bytes = bytes.len(), "Video downloaded");
        Ok(())
    }

    /// Generate a video end-to-end: submit, poll to completion, download the
    /// first output into `out_dir` named after `title`.
    pub async fn generate_to_file(
        &self,
        input: &TextToVideoInput,
        title: &str,
        out_dir: &Path,
    ) -> Result<PathBuf> {
        info!(title, "Submitting text-to-video task");
        let task = self.submit_text_to_video(input).await?;
        info!(task_id = %task.id, "Task submitted, polling for completion");

        let completed = self.wait_for_task(&task.id).await?;
        let output_url = completed
            .first_output_url()
            .ok_or(RunwayError::MissingOutput)?;

        let dest = out_dir.join(format!("{}.mp4", sanitize_filename(title)));
        self.download(output_url, &dest).await?;
        Ok(dest)
    }
}

/// Reduce a video title to a safe filename stem.
pub fn sanitize_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '_'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect();

    let trimmed = stem.trim_matches('_');
    if trimmed.is_empty() {
        "video".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(
            sanitize_filename("The Power of Virtual Data Rooms"),
            "The_Power_of_Virtual_Data_Rooms"
        );
        assert_eq!(sanitize_filename("M&A: Due Diligence?"), "MA_Due_Diligence");
        assert_eq!(sanitize_filename("!!!"), "video");
    }

    #[test]
    fn test_text_to_video_wire_shape() {
        let input = TextToVideoInput {
            prompt_text: "a corporate explainer".to_string(),
            duration: 120,
            ratio: "1280:720".to_string(),
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["promptText"], "a corporate explainer");
        assert_eq!(json["duration"], 120);
        assert_eq!(json["ratio"], "1280:720");
    }
}
