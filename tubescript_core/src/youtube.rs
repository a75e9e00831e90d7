// src/youtube.rs

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use yt_transcript_rs::js_var_parser::JsVarParser;
use yt_transcript_rs::models::TranslationLanguage as YtTranslationLanguage;
use yt_transcript_rs::{
    CaptionsExtractor, PlayabilityAsserter, Transcript, TranscriptList, YouTubeTranscriptApi,
    YoutubePageFetcher,
};

use crate::config::ServiceConfig;
use crate::error::{Result, TranscriptError};
use crate::language::LanguagePreference;
use crate::model::{TranscriptLine, TranscriptTrack, TranslationLanguage};
use crate::normalizer::VideoId;
use crate::provider::CaptionSource;

/// [`CaptionSource`] backed by YouTube's timedtext data via `yt-transcript-rs`.
pub struct YouTubeCaptions {
    api: YouTubeTranscriptApi,
    pages: YoutubePageFetcher,
    client: Client,
}

impl YouTubeCaptions {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.captions_timeout)
            .connect_timeout(config.captions_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let api = YouTubeTranscriptApi::new(None, None, Some(client.clone()))
            .map_err(|e| TranscriptError::Other(e.to_string()))?;
        let pages = YoutubePageFetcher::new(client.clone());

        Ok(Self { api, pages, client })
    }

    /// `playerCaptionsTracklistRenderer` of the watch page.
    async fn caption_data(&self, video_id: &VideoId) -> Result<Value> {
        let id = video_id.as_str();
        let html = self
            .pages
            .fetch_video_page(id)
            .await
            .map_err(provider_error)?;
        let player = JsVarParser::new("ytInitialPlayerResponse")
            .parse(&html, id)
            .map_err(provider_error)?;
        PlayabilityAsserter::assert_playability(&player, id).map_err(provider_error)?;
        CaptionsExtractor::extract_captions_data(&player, id).map_err(provider_error)
    }
}

#[async_trait]
impl CaptionSource for YouTubeCaptions {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn fetch_preferred(
        &self,
        video_id: &VideoId,
        languages: &LanguagePreference,
    ) -> Result<Vec<TranscriptLine>> {
        let codes: Vec<&str> = languages.iter().collect();
        let fetched = self
            .api
            .fetch_transcript(video_id.as_str(), &codes, false)
            .await
            .map_err(provider_error)?;

        Ok(to_lines(&fetched))
    }

    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<TranscriptTrack>> {
        let captions = self.caption_data(video_id).await?;
        tracks_from_captions(video_id, &captions)
    }

    async fn fetch_track(
        &self,
        video_id: &VideoId,
        track: &TranscriptTrack,
    ) -> Result<Vec<TranscriptLine>> {
        let fetched = source_transcript(video_id, track)?
            .fetch(&self.client, false)
            .await
            .map_err(provider_error)?;

        Ok(to_lines(&fetched))
    }
}

/// Tracks in the order the watch page lists them: manual tracks first, then
/// generated ones, each group in `captionTracks` order.
fn tracks_from_captions(video_id: &VideoId, captions: &Value) -> Result<Vec<TranscriptTrack>> {
    let list = TranscriptList::build_without_client(video_id.to_string(), captions)
        .map_err(provider_error)?;

    let listed: Vec<(&str, bool)> = captions
        .get("captionTracks")
        .and_then(Value::as_array)
        .map(|tracks| {
            tracks
                .iter()
                .filter_map(|t| {
                    let code = t.get("languageCode")?.as_str()?;
                    let asr = t.get("kind").and_then(Value::as_str) == Some("asr");
                    Some((code, asr))
                })
                .collect()
        })
        .unwrap_or_default();

    let mut out: Vec<TranscriptTrack> = Vec::new();
    for (generated, by_code) in [
        (false, &list.manually_created_transcripts),
        (true, &list.generated_transcripts),
    ] {
        for (code, asr) in &listed {
            let seen = out
                .iter()
                .any(|t| t.is_generated == generated && t.language_code == *code);
            if *asr != generated || seen {
                continue;
            }
            if let Some(transcript) = by_code.get(*code) {
                out.push(to_track(transcript));
            }
        }
    }

    Ok(out)
}

fn to_track(t: &Transcript) -> TranscriptTrack {
    TranscriptTrack {
        language: t.language().to_string(),
        language_code: t.language_code().to_string(),
        is_generated: t.is_generated(),
        is_translatable: t.is_translatable(),
        translation_languages: t
            .translation_languages
            .iter()
            .map(|l| TranslationLanguage {
                language: l.language.clone(),
                language_code: l.language_code.clone(),
            })
            .collect(),
        translated_from: None,
    }
}

/// Rebuild the crate-side transcript for `track`. `Transcript::fetch` resolves
/// caption URLs through InnerTube by language code, so no listed base URL is needed.
fn source_transcript(video_id: &VideoId, track: &TranscriptTrack) -> Result<Transcript> {
    match &track.translated_from {
        None => Ok(Transcript::new(
            video_id.to_string(),
            String::new(),
            track.language.clone(),
            track.language_code.clone(),
            track.is_generated,
            track
                .translation_languages
                .iter()
                .map(|l| YtTranslationLanguage {
                    language: l.language.clone(),
                    language_code: l.language_code.clone(),
                })
                .collect(),
        )),
        Some(source) => Transcript::new(
            video_id.to_string(),
            String::new(),
            source.clone(),
            source.clone(),
            track.is_generated,
            vec![YtTranslationLanguage {
                language: track.language.clone(),
                language_code: track.language_code.clone(),
            }],
        )
        .translate(&track.language_code)
        .map_err(provider_error),
    }
}

fn to_lines(fetched: &yt_transcript_rs::FetchedTranscript) -> Vec<TranscriptLine> {
    fetched
        .parts()
        .iter()
        .map(|p| TranscriptLine::new(p.text.clone(), p.start, p.duration))
        .collect()
}

fn provider_error(err: impl std::fmt::Display) -> TranscriptError {
    TranscriptError::Provider(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use serde_json::json;

    fn caption(code: &str, asr: bool) -> Value {
        let mut track = json!({
            "baseUrl": format!("https://www.youtube.com/api/timedtext?v=vid&lang={}", code),
            "name": { "simpleText": format!("Language {}", code) },
            "languageCode": code,
            "isTranslatable": true,
        });
        if asr {
            track["kind"] = json!("asr");
        }
        track
    }

    fn captions(tracks: Vec<Value>) -> Value {
        json!({
            "captionTracks": tracks,
            "translationLanguages": [
                { "languageCode": "en", "languageName": { "simpleText": "English" } }
            ],
        })
    }

    fn codes(tracks: &[TranscriptTrack]) -> Vec<(&str, bool)> {
        tracks
            .iter()
            .map(|t| (t.language_code.as_str(), t.is_generated))
            .collect()
    }

    #[test]
    fn test_tracks_follow_caption_track_order() {
        let langs = ["ja", "ko", "fr", "de", "it", "pt", "ru", "zh"];
        let data = captions(langs.iter().map(|c| caption(c, false)).collect());

        // HashMap iteration order varies between builds of the list.
        for _ in 0..20 {
            let tracks = tracks_from_captions(&normalize("vid"), &data).unwrap();
            let got: Vec<&str> = tracks.iter().map(|t| t.language_code.as_str()).collect();
            assert_eq!(got, langs);
        }
    }

    #[test]
    fn test_manual_tracks_come_before_generated() {
        let data = captions(vec![
            caption("en", true),
            caption("de", false),
            caption("fr", true),
            caption("es", false),
        ]);

        let tracks = tracks_from_captions(&normalize("vid"), &data).unwrap();

        assert_eq!(
            codes(&tracks),
            vec![("de", false), ("es", false), ("en", true), ("fr", true)]
        );
        assert!(tracks[0].can_translate_to("en"));
        assert_eq!(tracks[0].language, "Language de");
    }

    #[test]
    fn test_incomplete_caption_entries_are_skipped() {
        let mut nameless = caption("it", false);
        nameless.as_object_mut().unwrap().remove("name");
        let data = captions(vec![nameless, caption("de", false), caption("de", false)]);

        let tracks = tracks_from_captions(&normalize("vid"), &data).unwrap();

        assert_eq!(codes(&tracks), vec![("de", false)]);
    }

    #[test]
    fn test_source_transcript_for_translation() {
        let track = TranscriptTrack {
            language: "English".to_string(),
            language_code: "en".to_string(),
            is_generated: false,
            is_translatable: false,
            translation_languages: Vec::new(),
            translated_from: Some("ja".to_string()),
        };

        let transcript = source_transcript(&normalize("vid"), &track).unwrap();

        assert_eq!(transcript.language_code(), "en");
        assert_eq!(transcript.language(), "English");
        assert!(!transcript.is_generated());
        assert_eq!(transcript.video_id, "vid");
    }
}
