use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealSignalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Publish error: {0}")]
    Publish(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
