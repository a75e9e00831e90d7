//! Turns user input (a bare video ID or one of the common YouTube URL shapes)
//! into the canonical video identifier.
//!
//! Matching is substring based and deliberately lenient: anything that does not
//! look like a YouTube URL is passed through untouched and left for the captions
//! provider to reject.
//!
//! ```rust
//! use tubescript_core::normalizer::normalize;
//!
//! assert_eq!(normalize("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").as_str(), "dQw4w9WgXcQ");
//! assert_eq!(normalize("https://youtu.be/dQw4w9WgXcQ?si=share").as_str(), "dQw4w9WgXcQ");
//! assert_eq!(normalize("dQw4w9WgXcQ").as_str(), "dQw4w9WgXcQ");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Canonical video identifier as understood by the captions and metadata providers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Canonical watch page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL_BASE, self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extract the video identifier from `input`.
///
/// Rules are tried in order and the first match wins:
/// 1. `youtube.com/watch` with a `v=` parameter: text after `v=` up to the next `&`.
/// 2. `youtu.be/<id>`: text after `youtu.be/` up to the next `?`.
/// 3. `youtube.com/embed/<id>`: text after `embed/` up to the next `?`.
///
/// Anything else is returned unchanged. This never fails.
pub fn normalize(input: &str) -> VideoId {
    let input = input.trim();

    if !input.contains("youtube.com") && !input.contains("youtu.be") {
        return VideoId(input.to_string());
    }

    let extracted = if input.contains("youtube.com/watch") && input.contains("v=") {
        segment_after(input, "v=", '&')
    } else if input.contains("youtu.be/") {
        segment_after(input, "youtu.be/", '?')
    } else if input.contains("youtube.com/embed/") {
        segment_after(input, "embed/", '?')
    } else {
        None
    };

    VideoId(extracted.unwrap_or(input).to_string())
}

fn segment_after<'a>(input: &'a str, marker: &str, terminator: char) -> Option<&'a str> {
    let (_, rest) = input.split_once(marker)?;
    Some(rest.split(terminator).next().unwrap_or(rest))
}
