use tubescript_core::utils::{clean_html_entities, format_timestamp};
use tubescript_core::TranscriptResult;

use crate::cli::OutputFormat;
use crate::error::Result;

pub fn render(result: &TranscriptResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(result)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(result)?,
        OutputFormat::Text => render_text(result),
    })
}

fn render_text(result: &TranscriptResult) -> String {
    let info = result.video_info();
    let mut out = String::new();

    if let Some(title) = &info.title {
        out.push_str(&format!("Title: {}\n", clean_html_entities(title)));
    }
    if let Some(channel) = &info.channel {
        out.push_str(&format!("Channel: {}\n", clean_html_entities(channel)));
    }
    if let Some(lang) = result.language_used() {
        let kind = match info.is_generated {
            Some(true) => " (auto-generated)",
            _ => "",
        };
        out.push_str(&format!("Language: {}{}\n", lang, kind));
    }

    match result.transcript() {
        Some(lines) => {
            if !out.is_empty() {
                out.push('\n');
            }
            for line in lines {
                let text = clean_html_entities(&line.text).replace('\n', " ");
                out.push_str(&format!("[{}] {}\n", format_timestamp(line.start), text));
            }
        }
        None => {
            if let Some(err) = result.error() {
                out.push_str(&format!("Error: {}\n", err));
            }
        }
    }

    out
}
