use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] ignux_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid field assignment '{0}': expected key=value")]
    InvalidFieldAssignment(String),
    #[error("No content fields provided; use --field key=value or --json '{{...}}'")]
    EmptyFields,
    #[error("Content item id cannot be empty")]
    EmptyContentId,
    #[error("{0}")]
    Rejected(String),
}
