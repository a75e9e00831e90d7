use serde::{Deserialize, Serialize};

/// One caption line, passed through from the captions provider unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// Display duration, in seconds.
    pub duration: f64,
}

impl TranscriptLine {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationLanguage {
    pub language: String,
    pub language_code: String,
}

/// Descriptor of a single caption track offered by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptTrack {
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub is_translatable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translation_languages: Vec<TranslationLanguage>,
    /// Language code of the source track when this descriptor is a translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_from: Option<String>,
}

impl TranscriptTrack {
    pub fn can_translate_to(&self, language_code: &str) -> bool {
        self.is_translatable
            && self
                .translation_languages
                .iter()
                .any(|l| l.language_code == language_code)
    }

    /// Descriptor of this track machine-translated into `language_code`.
    ///
    /// Returns `None` when the track cannot be translated into that language.
    pub fn translate(&self, language_code: &str) -> Option<TranscriptTrack> {
        let target = self
            .translation_languages
            .iter()
            .find(|l| l.language_code == language_code)
            .filter(|_| self.is_translatable)?;

        Some(TranscriptTrack {
            language: target.language.clone(),
            language_code: target.language_code.clone(),
            is_generated: self.is_generated,
            is_translatable: false,
            translation_languages: Vec::new(),
            translated_from: Some(self.language_code.clone()),
        })
    }
}

/// Title and channel as reported by the metadata provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: Option<String>,
    pub channel: Option<String>,
}

/// Video details returned alongside every transcript result.
///
/// Absent fields are omitted, so a record with nothing known serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_generated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_translatable: Option<bool>,
}

impl VideoInfo {
    pub fn is_empty(&self) -> bool {
        *self == VideoInfo::default()
    }

    /// Record which transcript variant was used.
    pub fn set_track(&mut self, track: &TranscriptTrack) {
        self.language = Some(track.language.clone());
        self.language_code = Some(track.language_code.clone());
        self.is_generated = Some(track.is_generated);
        self.is_translatable = Some(track.is_translatable);
    }
}

impl From<VideoMetadata> for VideoInfo {
    fn from(meta: VideoMetadata) -> Self {
        VideoInfo {
            title: meta.title,
            channel: meta.channel,
            ..Default::default()
        }
    }
}

/// Resolution step recorded in a [`StageAttempt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Metadata,
    Direct,
    List,
    Manual,
    Generated,
    Any,
    Translate,
    Fetch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Hit,
    Miss,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAttempt {
    pub stage: Stage,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl StageAttempt {
    pub fn new(stage: Stage, outcome: Outcome, detail: Option<String>) -> Self {
        Self {
            stage,
            outcome,
            detail,
        }
    }
}

/// Response entity for a single transcript request.
///
/// `success == true` always comes with a transcript and `languageUsed`;
/// `success == false` always comes with an error and no transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResult {
    success: bool,
    error: Option<String>,
    transcript: Option<Vec<TranscriptLine>>,
    video_info: VideoInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language_used: Option<String>,
    #[serde(skip)]
    trace: Vec<StageAttempt>,
}

impl TranscriptResult {
    pub fn succeeded(
        transcript: Vec<TranscriptLine>,
        language_used: impl Into<String>,
        video_info: VideoInfo,
    ) -> Self {
        Self {
            success: true,
            error: None,
            transcript: Some(transcript),
            video_info,
            language_used: Some(language_used.into()),
            trace: Vec::new(),
        }
    }

    pub fn failed(error: impl Into<String>, video_info: VideoInfo) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            transcript: None,
            video_info,
            language_used: None,
            trace: Vec::new(),
        }
    }

    pub fn with_trace(mut self, trace: Vec<StageAttempt>) -> Self {
        self.trace = trace;
        self
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn transcript(&self) -> Option<&[TranscriptLine]> {
        self.transcript.as_deref()
    }

    pub fn video_info(&self) -> &VideoInfo {
        &self.video_info
    }

    pub fn language_used(&self) -> Option<&str> {
        self.language_used.as_deref()
    }

    /// Stage-by-stage record of how the result was reached. Never serialized.
    pub fn trace(&self) -> &[StageAttempt] {
        &self.trace
    }
}
