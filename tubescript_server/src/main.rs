use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tubescript_core::config::{
    ServiceConfig, DEFAULT_CAPTIONS_TIMEOUT, DEFAULT_METADATA_ENDPOINT, DEFAULT_METADATA_TIMEOUT,
    DEFAULT_USER_AGENT,
};
use tubescript_core::language::DEFAULT_LANGUAGE;
use tubescript_server::config::DEFAULT_BIND;
use tubescript_server::{app, AppState, ServerConfig};

#[derive(Parser)]
#[command(name = "tubescript-server")]
#[command(about = "Serve YouTube transcripts over HTTP as JSON")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "TUBESCRIPT_BIND", default_value = DEFAULT_BIND)]
    bind: SocketAddr,

    /// Language used when a request names none
    #[arg(long, env = "TUBESCRIPT_DEFAULT_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    default_language: String,

    /// oEmbed-style endpoint for title/channel lookups
    #[arg(long, env = "TUBESCRIPT_METADATA_ENDPOINT", default_value = DEFAULT_METADATA_ENDPOINT)]
    metadata_endpoint: String,

    /// Metadata request timeout in seconds
    #[arg(long, env = "TUBESCRIPT_METADATA_TIMEOUT", default_value_t = DEFAULT_METADATA_TIMEOUT.as_secs())]
    metadata_timeout: u64,

    /// Captions request timeout in seconds
    #[arg(long, env = "TUBESCRIPT_CAPTIONS_TIMEOUT", default_value_t = DEFAULT_CAPTIONS_TIMEOUT.as_secs())]
    captions_timeout: u64,

    /// User-Agent sent to upstream services
    #[arg(long, env = "TUBESCRIPT_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let service = ServiceConfig::default()
            .with_default_language(self.default_language)
            .with_metadata_endpoint(self.metadata_endpoint)
            .with_metadata_timeout(Duration::from_secs(self.metadata_timeout))
            .with_captions_timeout(Duration::from_secs(self.captions_timeout))
            .with_user_agent(self.user_agent);
        ServerConfig::new(self.bind, service)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubescript_server=info,tubescript_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config();

    let resolver = tubescript_core::build_resolver(&config.service)?;
    let bind = config.bind;
    let state = AppState::new(resolver, config);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %bind, "Transcript server listening");

    if let Err(e) = axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Transcript server shut down cleanly.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl+c: {}", e);
    }
    info!("Shutting down...");
}
