use clap::Parser;
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod error;
mod output;

use cli::Cli;
use error::{CliError, Result};
use tubescript_core::{normalize, LanguagePreference};

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubescript_cli=warn,tubescript_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.service_config();
    let resolver = tubescript_core::build_resolver(&config)?;

    let video_id = normalize(&cli.video_id);
    let languages = LanguagePreference::new(cli.languages.iter(), &config.default_language);
    tracing::info!(video_id = %video_id, languages = %languages.joined(), "Fetching transcript");

    let result = resolver.resolve(&video_id, &languages).await;
    print!("{}", with_trailing_newline(output::render(&result, cli.output)?));

    if result.success() {
        Ok(())
    } else {
        Err(CliError::TranscriptUnavailable(
            result.error().unwrap_or("transcript unavailable").to_string(),
        ))
    }
}

fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
