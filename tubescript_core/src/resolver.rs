//! Transcript resolution with language fallback.
//!
//! Given a video and an ordered language preference, the resolver tries, in
//! order:
//!
//! 1. the provider's direct lookup for the whole preference list;
//! 2. a manually created track in any preferred language;
//! 3. an auto-generated track in any preferred language;
//! 4. any track in a preferred language, otherwise the first track the video
//!    has, translated into the primary language when the provider allows it.
//!
//! Metadata (title, channel) is fetched independently beforehand and merged into
//! whatever result comes out. The resolver never returns an error: failures end
//! up in [`TranscriptResult::error`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::TranscriptError;
use crate::language::LanguagePreference;
use crate::metadata::{fetch_video_info, MetadataSource};
use crate::model::{Outcome, Stage, StageAttempt, TranscriptResult, TranscriptTrack};
use crate::normalizer::VideoId;
use crate::provider::CaptionSource;

#[derive(Clone)]
pub struct TranscriptResolver {
    captions: Arc<dyn CaptionSource>,
    metadata: Arc<dyn MetadataSource>,
}

/// Track picked by the enumerated fallback, and the language to report for it.
#[derive(Debug, Clone, PartialEq)]
struct Selection {
    track: TranscriptTrack,
    language_used: String,
}

impl TranscriptResolver {
    pub fn new(captions: Arc<dyn CaptionSource>, metadata: Arc<dyn MetadataSource>) -> Self {
        Self { captions, metadata }
    }

    pub async fn resolve(
        &self,
        video_id: &VideoId,
        languages: &LanguagePreference,
    ) -> TranscriptResult {
        let mut trace = Vec::new();

        let mut video_info = fetch_video_info(self.metadata.as_ref(), video_id).await;
        trace.push(StageAttempt::new(
            Stage::Metadata,
            if video_info.is_empty() {
                Outcome::Miss
            } else {
                Outcome::Hit
            },
            None,
        ));

        // Fast path. The provider does not say which variant it used, so the
        // result is reported as generated and translatable.
        match self.captions.fetch_preferred(video_id, languages).await {
            Ok(lines) => {
                let primary = languages.primary().to_string();
                info!(
                    video_id = %video_id,
                    language = %primary,
                    lines = lines.len(),
                    "Transcript fetched via direct lookup"
                );
                video_info.language = Some(primary.clone());
                video_info.language_code = Some(primary.clone());
                video_info.is_generated = Some(true);
                video_info.is_translatable = Some(true);
                trace.push(StageAttempt::new(Stage::Direct, Outcome::Hit, None));
                return TranscriptResult::succeeded(lines, primary, video_info).with_trace(trace);
            }
            Err(e) => {
                warn!(
                    error = %e,
                    provider = self.captions.name(),
                    video_id = %video_id,
                    "Direct transcript retrieval failed"
                );
                trace.push(StageAttempt::new(
                    Stage::Direct,
                    Outcome::Failed,
                    Some(e.to_string()),
                ));
            }
        }

        let tracks = match self.captions.list_tracks(video_id).await {
            Ok(tracks) => {
                trace.push(StageAttempt::new(
                    Stage::List,
                    Outcome::Hit,
                    Some(format!("{} track(s)", tracks.len())),
                ));
                tracks
            }
            Err(e) => {
                warn!(error = %e, video_id = %video_id, "Listing transcript tracks failed");
                trace.push(StageAttempt::new(
                    Stage::List,
                    Outcome::Failed,
                    Some(e.to_string()),
                ));
                return TranscriptResult::failed(e.to_string(), video_info).with_trace(trace);
            }
        };

        let Some(selection) = select_track(&tracks, languages, &mut trace) else {
            let err = TranscriptError::NoTranscript {
                video_id: video_id.to_string(),
                languages: languages.joined(),
            };
            info!(video_id = %video_id, languages = %languages.joined(), "No transcript available");
            return TranscriptResult::failed(err.to_string(), video_info).with_trace(trace);
        };

        debug!(
            video_id = %video_id,
            language_code = %selection.track.language_code,
            is_generated = selection.track.is_generated,
            translated_from = ?selection.track.translated_from,
            "Selected transcript track"
        );

        match self.captions.fetch_track(video_id, &selection.track).await {
            Ok(lines) => {
                trace.push(StageAttempt::new(Stage::Fetch, Outcome::Hit, None));
                video_info.set_track(&selection.track);
                info!(
                    video_id = %video_id,
                    language = %selection.language_used,
                    lines = lines.len(),
                    "Transcript fetched via track listing"
                );
                TranscriptResult::succeeded(lines, selection.language_used, video_info)
                    .with_trace(trace)
            }
            Err(e) => {
                warn!(error = %e, video_id = %video_id, "Fetching selected transcript failed");
                trace.push(StageAttempt::new(
                    Stage::Fetch,
                    Outcome::Failed,
                    Some(e.to_string()),
                ));
                TranscriptResult::failed(e.to_string(), video_info).with_trace(trace)
            }
        }
    }
}

fn select_track(
    tracks: &[TranscriptTrack],
    languages: &LanguagePreference,
    trace: &mut Vec<StageAttempt>,
) -> Option<Selection> {
    for (stage, generated) in [(Stage::Manual, false), (Stage::Generated, true)] {
        let found = languages.iter().find_map(|lang| {
            tracks
                .iter()
                .find(|t| t.is_generated == generated && t.language_code == lang)
                .map(|t| Selection {
                    track: t.clone(),
                    language_used: lang.to_string(),
                })
        });

        match found {
            Some(selection) => {
                trace.push(StageAttempt::new(
                    stage,
                    Outcome::Hit,
                    Some(selection.language_used.clone()),
                ));
                return Some(selection);
            }
            None => trace.push(StageAttempt::new(stage, Outcome::Miss, None)),
        }
    }

    let Some(first) = tracks.first() else {
        trace.push(StageAttempt::new(
            Stage::Any,
            Outcome::Miss,
            Some("video has no transcript tracks".to_string()),
        ));
        return None;
    };

    if let Some(lang) = languages
        .iter()
        .find(|lang| tracks.iter().any(|t| t.language_code == *lang))
    {
        // Manual tracks win over generated ones for the same language.
        let track = tracks
            .iter()
            .filter(|t| t.language_code == lang)
            .min_by_key(|t| t.is_generated)
            .unwrap_or(first);
        trace.push(StageAttempt::new(Stage::Any, Outcome::Hit, Some(lang.to_string())));
        return Some(Selection {
            track: track.clone(),
            language_used: lang.to_string(),
        });
    }

    trace.push(StageAttempt::new(
        Stage::Any,
        Outcome::Hit,
        Some(first.language_code.clone()),
    ));

    let primary = languages.primary();
    match first.translate(primary) {
        Some(translated) => {
            trace.push(StageAttempt::new(
                Stage::Translate,
                Outcome::Hit,
                Some(format!("{} -> {}", first.language_code, primary)),
            ));
            Some(Selection {
                track: translated,
                language_used: primary.to_string(),
            })
        }
        None => {
            trace.push(StageAttempt::new(Stage::Translate, Outcome::Miss, None));
            Some(Selection {
                track: first.clone(),
                language_used: first.language_code.clone(),
            })
        }
    }
}
