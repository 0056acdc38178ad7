pub mod config;
pub mod error;
pub mod types;

pub use config::{ContentConfig, PublisherConfig, ReporterConfig, ScoutConfig};
pub use error::DealSignalError;
pub use types::*;
