use serde::{Deserialize, Serialize};

/// Input for the text-to-video endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TextToVideoInput {
    #[serde(rename = "promptText")]
    pub prompt_text: String,
    /// Clip length in seconds.
    pub duration: u32,
    pub ratio: String,
}

/// Task metadata as returned by submit and by the status poll.
///
/// The API has shipped both `output: [url, ...]` and `outputs: [{url}, ...]`
/// shapes; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskData {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub output: Option<Vec<String>>,
    #[serde(default)]
    pub outputs: Option<Vec<TaskOutput>>,
    #[serde(default)]
    pub failure: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskOutput {
    pub url: String,
}

impl TaskData {
    /// Returns whichever output URL field is populated, preferring the
    /// structured `outputs` form.
    pub fn first_output_url(&self) -> Option<&str> {
        self.outputs
            .as_deref()
            .and_then(|outs| outs.first())
            .map(|o| o.url.as_str())
            .or_else(|| {
                self.output
                    .as_deref()
                    .and_then(|urls| urls.first())
                    .map(String::as_str)
            })
    }
}

/// Where a polled task sits relative to its terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Succeeded,
    Failed,
    Pending,
}

/// Classify a raw status string. Vendors have shipped both upper- and
/// lower-case variants, so matching is case-insensitive; anything
/// unrecognized counts as still pending.
pub fn classify_status(status: &str) -> TaskState {
    let s = status.trim();
    if s.eq_ignore_ascii_case("succeeded") {
        TaskState::Succeeded
    } else if s.eq_ignore_ascii_case("failed")
        || s.eq_ignore_ascii_case("timed_out")
        || s.eq_ignore_ascii_case("timed-out")
        || s.eq_ignore_ascii_case("canceled")
        || s.eq_ignore_ascii_case("cancelled")
    {
        TaskState::Failed
    } else {
        TaskState::Pending
    }
}
