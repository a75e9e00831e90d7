use std::time::Duration;

use clap::{Parser, ValueEnum};
use tubescript_core::config::{
    DEFAULT_CAPTIONS_TIMEOUT, DEFAULT_METADATA_ENDPOINT, DEFAULT_METADATA_TIMEOUT,
    DEFAULT_USER_AGENT,
};
use tubescript_core::language::DEFAULT_LANGUAGE;
use tubescript_core::ServiceConfig;

#[derive(Parser, Debug)]
#[command(name = "tubescript")]
#[command(about = "Tubescript - fetch YouTube transcripts with language fallback")]
#[command(version)]
#[command(after_help = "\x1b[1;36mExamples:\x1b[0m
  tubescript --video-id dQw4w9WgXcQ
  tubescript --video-id https://youtu.be/dQw4w9WgXcQ --languages de en
  tubescript --video-id dQw4w9WgXcQ --output text")]
pub struct Cli {
    /// Video ID or any common YouTube URL
    #[arg(long)]
    pub video_id: String,

    /// Preferred languages, most preferred first
    #[arg(long, num_args = 1..)]
    pub languages: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    /// Language used when --languages is empty
    #[arg(long, env = "TUBESCRIPT_DEFAULT_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub default_language: String,

    /// oEmbed-style endpoint for title/channel lookups
    #[arg(long, env = "TUBESCRIPT_METADATA_ENDPOINT", default_value = DEFAULT_METADATA_ENDPOINT)]
    pub metadata_endpoint: String,

    /// Metadata request timeout in seconds
    #[arg(long, env = "TUBESCRIPT_METADATA_TIMEOUT", default_value_t = DEFAULT_METADATA_TIMEOUT.as_secs())]
    pub metadata_timeout: u64,

    /// Captions request timeout in seconds
    #[arg(long, env = "TUBESCRIPT_CAPTIONS_TIMEOUT", default_value_t = DEFAULT_CAPTIONS_TIMEOUT.as_secs())]
    pub captions_timeout: u64,

    /// User-Agent sent to upstream services
    #[arg(long, env = "TUBESCRIPT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Cli {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::default()
            .with_default_language(self.default_language.clone())
            .with_metadata_endpoint(self.metadata_endpoint.clone())
            .with_metadata_timeout(Duration::from_secs(self.metadata_timeout))
            .with_captions_timeout(Duration::from_secs(self.captions_timeout))
            .with_user_agent(self.user_agent.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, same shape as the HTTP endpoint
    Json,
    /// Indented JSON
    Pretty,
    /// Header plus timestamped transcript lines
    Text,
}
