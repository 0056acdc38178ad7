use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunwayError>;

#[derive(Debug, Error)]
pub enum RunwayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Task failed with status: {0}")]
    TaskFailed(String),

    #[error("Task did not reach a terminal status within {0} seconds")]
    Timeout(u64),

    #[error("Task succeeded but returned no output URL")]
    MissingOutput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for RunwayError {
    fn from(err: reqwest::Error) -> Self {
        RunwayError::Network(err.to_string())
    }
}
