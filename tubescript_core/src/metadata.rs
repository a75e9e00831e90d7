//! Lightweight video metadata (title and channel) from an oEmbed-style endpoint.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::{Result, TranscriptError};
use crate::model::{VideoInfo, VideoMetadata};
use crate::normalizer::VideoId;

#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn video_metadata(&self, video_id: &VideoId) -> Result<VideoMetadata>;
}

/// Queries `<endpoint>?url=<watch url>` and reads `title` / `author_name`.
pub struct OEmbedClient {
    client: Client,
    endpoint: Url,
}

impl OEmbedClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.metadata_endpoint).map_err(|e| {
            TranscriptError::InvalidInput(format!(
                "metadata endpoint '{}': {}",
                config.metadata_endpoint, e
            ))
        })?;

        let client = Client::builder()
            .timeout(config.metadata_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn request_url(&self, video_id: &VideoId) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", &video_id.watch_url());
        url
    }
}

#[async_trait]
impl MetadataSource for OEmbedClient {
    async fn video_metadata(&self, video_id: &VideoId) -> Result<VideoMetadata> {
        let url = self.request_url(video_id);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        let obj = value.as_object().ok_or_else(|| {
            TranscriptError::InvalidResponse("metadata response is not a JSON object".to_string())
        })?;

        // noembed answers unknown videos with 200 and an `error` field.
        if let Some(err) = obj.get("error").and_then(Value::as_str) {
            return Err(TranscriptError::InvalidResponse(err.to_string()));
        }

        Ok(VideoMetadata {
            title: obj.get("title").and_then(Value::as_str).map(str::to_string),
            channel: obj
                .get("author_name")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Metadata for `video_id`, or an empty record if anything goes wrong.
pub async fn fetch_video_info(source: &dyn MetadataSource, video_id: &VideoId) -> VideoInfo {
    match source.video_metadata(video_id).await {
        Ok(meta) => VideoInfo::from(meta),
        Err(e) => {
            tracing::warn!(
                error = %e,
                code = e.code_str(),
                video_id = %video_id,
                "Failed to fetch video metadata"
            );
            VideoInfo::default()
        }
    }
}
