use crate::model::TranscriptLine;

pub fn clean_html_entities(text: &str) -> String {
    let mut cleaned = text.to_string();
    // Captions are sometimes double-encoded.
    for _ in 0..2 {
        let decoded = html_escape::decode_html_entities(&cleaned).into_owned();
        if decoded == cleaned {
            break;
        }
        cleaned = decoded;
    }
    cleaned
}

/// `mm:ss`, or `h:mm:ss` past the first hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

/// Join all lines into one block of plain text, entities decoded.
pub fn transcript_text(lines: &[TranscriptLine]) -> String {
    let raw = lines
        .iter()
        .map(|l| l.text.replace('\n', " "))
        .collect::<Vec<_>>()
        .join(" ");
    clean_html_entities(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_entities_handles_double_encoding() {
        assert_eq!(clean_html_entities("it&#39;s"), "it's");
        assert_eq!(clean_html_entities("a &amp;amp; b"), "a & b");
        assert_eq!(clean_html_entities("plain"), "plain");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.7), "01:05");
        assert_eq!(format_timestamp(3725.0), "1:02:05");
        assert_eq!(format_timestamp(-3.0), "00:00");
    }

    #[test]
    fn test_transcript_text() {
        let lines = vec![
            TranscriptLine::new("hello\nthere", 0.0, 1.0),
            TranscriptLine::new("&quot;world&quot;", 1.0, 1.0),
        ];
        assert_eq!(transcript_text(&lines), "hello there \"world\"");
    }
}
