// src/error.rs

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure reported by the captions provider (video unavailable,
    /// transcripts disabled, region blocked, ...). The message is kept verbatim.
    #[error("{0}")]
    Provider(String),

    #[error("No transcript available for video {video_id} in languages: {languages}")]
    NoTranscript { video_id: String, languages: String },

    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("HTTP error {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl TranscriptError {
    pub fn code_str(&self) -> &'static str {
        match self {
            TranscriptError::InvalidInput(_) => "invalid_input",
            TranscriptError::Provider(_) => "upstream_error",
            TranscriptError::NoTranscript { .. } => "not_found",
            TranscriptError::HttpRequest(e) if e.is_timeout() => "timeout",
            TranscriptError::HttpRequest(_) => "upstream_error",
            TranscriptError::HttpStatus { .. } => "upstream_error",
            TranscriptError::InvalidResponse(_) => "parse_error",
            TranscriptError::SerdeJson(_) => "parse_error",
            TranscriptError::Timeout(_) => "timeout",
            TranscriptError::Other(_) => "internal_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, TranscriptError>;
