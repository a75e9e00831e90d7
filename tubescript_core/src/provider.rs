//! Captions provider abstraction.
//!
//! The resolver only talks to a [`CaptionSource`]; the YouTube implementation
//! lives in [`crate::youtube`] behind the `youtube` feature.

use async_trait::async_trait;

use crate::error::Result;
use crate::language::LanguagePreference;
use crate::model::{TranscriptLine, TranscriptTrack};
use crate::normalizer::VideoId;

#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Combined find+fetch: the provider picks the first language in `languages`
    /// it has a track for, manual or generated, and returns its lines.
    async fn fetch_preferred(
        &self,
        video_id: &VideoId,
        languages: &LanguagePreference,
    ) -> Result<Vec<TranscriptLine>>;

    /// Every track available for the video, in provider order.
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<TranscriptTrack>>;

    /// Lines of one track previously returned by [`CaptionSource::list_tracks`],
    /// or of a translation of it (see [`TranscriptTrack::translate`]).
    async fn fetch_track(
        &self,
        video_id: &VideoId,
        track: &TranscriptTrack,
    ) -> Result<Vec<TranscriptLine>>;
}
