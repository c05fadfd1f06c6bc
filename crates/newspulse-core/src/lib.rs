//! Shared data model and configuration for the newspulse workspace.

pub mod app_config;
pub mod config;
pub mod types;

pub use app_config::PipelineConfig;
pub use config::{load_pipeline_config, load_pipeline_config_from_env};
pub use types::{Article, Classification, DetailedResult, Label, Report, Summary};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
