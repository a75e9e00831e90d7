use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Core library error: {0}")]
    Core(#[from] tubescript_core::TranscriptError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    TranscriptUnavailable(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
