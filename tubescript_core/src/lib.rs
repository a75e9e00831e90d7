// src/lib.rs
pub mod config;
pub mod error;
pub mod language;
pub mod metadata;
pub mod model;
pub mod normalizer;
pub mod provider;
pub mod resolver;
pub mod utils;
#[cfg(feature = "youtube")]
pub mod youtube;

pub use config::ServiceConfig;
pub use error::{Result, TranscriptError};
pub use language::LanguagePreference;
pub use metadata::{MetadataSource, OEmbedClient};
pub use model::{
    Outcome, Stage, StageAttempt, TranscriptLine, TranscriptResult, TranscriptTrack, VideoInfo,
    VideoMetadata,
};
pub use normalizer::{normalize, VideoId};
pub use provider::CaptionSource;
pub use resolver::TranscriptResolver;

/// Build a resolver wired to YouTube captions and the configured oEmbed endpoint.
#[cfg(feature = "youtube")]
pub fn build_resolver(config: &ServiceConfig) -> Result<TranscriptResolver> {
    use std::sync::Arc;

    let captions = youtube::YouTubeCaptions::new(config)?;
    let metadata = OEmbedClient::new(config)?;
    Ok(TranscriptResolver::new(Arc::new(captions), Arc::new(metadata)))
}
